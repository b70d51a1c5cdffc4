//! Client-side error taxonomy.
//!
//! `RejectReason` is the ledger's verdict on a submitted envelope. The one
//! retry-worthy value is `BadSequence` — a state race where the account
//! moved between load and submit; everything else is an unmet precondition
//! that retrying cannot fix.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why the ledger refused a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum RejectReason {
    #[error("source account not found")]
    AccountNotFound,

    #[error("bad sequence number: account is at {current}, transaction carries {submitted}")]
    BadSequence { current: u64, submitted: u64 },

    #[error("insufficient signature weight: need {needed}, have {have}")]
    BadAuth { needed: u8, have: u32 },

    #[error("transaction submitted before its minimum time")]
    TooEarly,

    #[error("transaction submitted after its maximum time")]
    TooLate,

    #[error("insufficient native balance for fee")]
    InsufficientFee,

    #[error("destination has no trustline for the asset")]
    NoTrustline,

    #[error("trustline is not authorized by the issuer")]
    NotAuthorized,

    #[error("authorization is not required by the issuer")]
    AuthNotRequired,

    #[error("issuer cannot revoke authorization without the revocable flag")]
    AuthNotRevocable,

    #[error("payment would exceed the trustline limit")]
    LineFull,

    #[error("insufficient asset balance")]
    Underfunded,

    #[error("asset issuer account does not exist")]
    NoIssuer,

    #[error("offer not found or not owned by the source account")]
    OfferNotFound,

    #[error("trustline has a nonzero balance and cannot be deleted")]
    TrustlineInUse,

    #[error("destination account not found")]
    DestinationNotFound,

    #[error("{0}")]
    Other(String),
}

impl RejectReason {
    /// Whether a reload-and-rebuild retry is safe and potentially useful.
    pub fn is_sequence_race(&self) -> bool {
        matches!(self, Self::BadSequence { .. })
    }
}

/// Errors surfaced by a [`crate::LedgerClient`] implementation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The ledger processed the envelope and said no.
    #[error("transaction rejected: {0}")]
    Rejected(RejectReason),

    /// The ledger could not be reached.
    #[error("transport error: {0}")]
    Transport(String),

    /// The ledger answered with something unparseable.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Local envelope encoding failed before anything was sent.
    #[error("envelope encoding failed: {0}")]
    Encode(String),
}

impl ClientError {
    pub fn is_sequence_race(&self) -> bool {
        matches!(self, Self::Rejected(r) if r.is_sequence_race())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_bad_sequence_is_a_race() {
        assert!(RejectReason::BadSequence {
            current: 5,
            submitted: 4
        }
        .is_sequence_race());
        assert!(!RejectReason::NoTrustline.is_sequence_race());
        assert!(!RejectReason::BadAuth { needed: 4, have: 3 }.is_sequence_race());
    }

    #[test]
    fn reject_reason_wire_roundtrip() {
        let reason = RejectReason::BadSequence {
            current: 9,
            submitted: 7,
        };
        let json = serde_json::to_string(&reason).unwrap();
        let back: RejectReason = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reason);
    }
}
