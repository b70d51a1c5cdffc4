//! The identity registry: every key pair the protocol runs with.
//!
//! Built once at process start from configured secret seeds and passed by
//! reference into each phase — there is no ambient global key table.
//! Secret keys never leave this process; only public keys and account ids
//! go over the wire.

use crate::ProtocolError;
use tessera_crypto::derive_account_id;
use tessera_types::{AccountId, AssetCode, KeyPair};

/// Number of admin identities on the roster.
pub const ADMIN_COUNT: usize = 2;

/// Committee size: the two admins plus two voter representatives.
pub const COMMITTEE_SIZE: usize = 4;

/// A named key pair with its derived account id.
pub struct Identity {
    pub name: String,
    pub keys: KeyPair,
    pub account_id: AccountId,
}

impl Identity {
    pub fn new(name: impl Into<String>, keys: KeyPair) -> Self {
        let account_id = derive_account_id(&keys.public);
        Self {
            name: name.into(),
            keys,
            account_id,
        }
    }
}

/// One option on the ballot: a display name and the receipt-token code that
/// counts its votes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub code: AssetCode,
}

impl Candidate {
    pub fn new(name: impl Into<String>, code: AssetCode) -> Self {
        Self {
            name: name.into(),
            code,
        }
    }
}

/// The fixed set of identities the protocol runs with: the voter roll, the
/// admins, and the three jointly governed accounts.
pub struct Roster {
    pub voters: Vec<Identity>,
    pub admins: Vec<Identity>,
    /// Issues the ballot token (authorization required).
    pub ballot_issuer: Identity,
    /// Issues the per-candidate receipt tokens (freely holdable).
    pub receipt_issuer: Identity,
    /// The collection account: order-book counterparty and ballot box.
    pub collector: Identity,
}

impl Roster {
    /// Assemble and validate the roster. The committee needs two voter
    /// representatives, so at least two voters must exist; exactly two
    /// admins are expected.
    pub fn new(
        voters: Vec<Identity>,
        admins: Vec<Identity>,
        ballot_issuer: Identity,
        receipt_issuer: Identity,
        collector: Identity,
    ) -> Result<Self, ProtocolError> {
        if admins.len() != ADMIN_COUNT {
            return Err(ProtocolError::Config(format!(
                "expected {ADMIN_COUNT} admins, got {}",
                admins.len()
            )));
        }
        if voters.len() < COMMITTEE_SIZE - ADMIN_COUNT {
            return Err(ProtocolError::Config(format!(
                "need at least {} voters to seat the committee, got {}",
                COMMITTEE_SIZE - ADMIN_COUNT,
                voters.len()
            )));
        }
        Ok(Self {
            voters,
            admins,
            ballot_issuer,
            receipt_issuer,
            collector,
        })
    }

    /// The four identities whose joint signature authorizes every
    /// governance action: both admins and the first two voters.
    pub fn committee(&self) -> Vec<&Identity> {
        self.admins
            .iter()
            .chain(self.voters.iter().take(COMMITTEE_SIZE - ADMIN_COUNT))
            .collect()
    }

    /// Committee key pairs in signing order.
    pub fn committee_keys(&self) -> Vec<&KeyPair> {
        self.committee().into_iter().map(|i| &i.keys).collect()
    }

    /// Look a voter up by name.
    pub fn voter(&self, name: &str) -> Option<&Identity> {
        self.voters.iter().find(|v| v.name == name)
    }

    /// Every account id on the roster (the funding phase's worklist).
    pub fn all_account_ids(&self) -> Vec<&AccountId> {
        self.voters
            .iter()
            .chain(self.admins.iter())
            .chain([&self.ballot_issuer, &self.receipt_issuer, &self.collector])
            .map(|i| &i.account_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_crypto::keypair_from_seed;

    fn identity(name: &str, seed: u8) -> Identity {
        Identity::new(name, keypair_from_seed(&[seed; 32]))
    }

    fn voters(n: usize) -> Vec<Identity> {
        (0..n)
            .map(|i| identity(&format!("voter-{i}"), 10 + i as u8))
            .collect()
    }

    fn admins() -> Vec<Identity> {
        vec![identity("admin-x", 1), identity("admin-y", 2)]
    }

    fn roster(voter_count: usize) -> Result<Roster, ProtocolError> {
        Roster::new(
            voters(voter_count),
            admins(),
            identity("ballot-issuer", 3),
            identity("receipt-issuer", 4),
            identity("collector", 5),
        )
    }

    #[test]
    fn committee_is_admins_plus_two_voters() {
        let roster = roster(7).unwrap();
        let committee = roster.committee();
        assert_eq!(committee.len(), COMMITTEE_SIZE);
        assert_eq!(committee[0].name, "admin-x");
        assert_eq!(committee[1].name, "admin-y");
        assert_eq!(committee[2].name, "voter-0");
        assert_eq!(committee[3].name, "voter-1");
    }

    #[test]
    fn too_few_voters_rejected() {
        assert!(matches!(roster(1), Err(ProtocolError::Config(_))));
    }

    #[test]
    fn wrong_admin_count_rejected() {
        let result = Roster::new(
            voters(7),
            vec![identity("admin-x", 1)],
            identity("ballot-issuer", 3),
            identity("receipt-issuer", 4),
            identity("collector", 5),
        );
        assert!(matches!(result, Err(ProtocolError::Config(_))));
    }

    #[test]
    fn all_account_ids_covers_roster() {
        let roster = roster(7).unwrap();
        // 7 voters + 2 admins + 3 governance accounts
        assert_eq!(roster.all_account_ids().len(), 12);
    }
}
