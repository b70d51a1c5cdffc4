//! Result tally reader.
//!
//! Pure read: votes(candidate) = limit − balance on the collection
//! account's receipt trustline. The limit was set to the full receipt
//! supply at issuance time and the balance drops by one for every executed
//! ballot-for-receipt trade, so the difference counts executed votes
//! without enumerating trades. No side effects; calling it twice without
//! intervening trades yields identical results.

use crate::registry::Candidate;
use crate::ProtocolError;
use tessera_client::{LedgerClient, RejectReason};
use tessera_types::{AccountId, Asset};

/// One candidate's final count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteCount {
    pub candidate: Candidate,
    pub votes: u64,
}

/// Read the vote counts off the collection account, sorted descending.
///
/// A candidate with no executed trades (balance == limit) counts 0.
/// A missing receipt trustline means issuance never ran for that candidate
/// and is surfaced as a precondition failure, not a zero.
pub async fn tally<C: LedgerClient>(
    client: &C,
    collector: &AccountId,
    receipt_issuer: &AccountId,
    candidates: &[Candidate],
) -> Result<Vec<VoteCount>, ProtocolError> {
    let balances = client
        .balances(collector)
        .await
        .map_err(ProtocolError::classify)?;

    let mut counts = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let asset = Asset::credit(candidate.code.clone(), receipt_issuer.clone());
        let record = balances
            .iter()
            .find(|b| b.asset == asset)
            .ok_or(ProtocolError::Precondition {
                reason: RejectReason::NoTrustline,
            })?;
        let votes = record.limit.saturating_sub(record.balance).units();
        counts.push(VoteCount {
            candidate: candidate.clone(),
            votes,
        });
    }
    counts.sort_by(|a, b| b.votes.cmp(&a.votes));
    Ok(counts)
}
