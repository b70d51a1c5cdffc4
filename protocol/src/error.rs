//! Protocol-level error taxonomy.
//!
//! Four classes with different handling:
//! - `Config` — fatal before any network call; fix the configuration.
//! - `Precondition` — the ledger rejected the transaction for a reason a
//!   retry cannot fix; remediate state and re-run the phase.
//! - `SequenceRace` — the account moved under us; safe to retry once from
//!   reloaded state.
//! - `SequencePrecondition` — the finalizer's guard: live state no longer
//!   matches what the pre-authorized hash was built against. Installation
//!   is refused because proceeding would brick finalization permanently.

use tessera_client::{ClientError, RejectReason};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("precondition not met: {reason}")]
    Precondition { reason: RejectReason },

    #[error("stale sequence number; reload account state and rebuild")]
    SequenceRace,

    #[error("sequence precondition violated: finalization was built at sequence {built_at}, account is now at {live}")]
    SequencePrecondition { built_at: u64, live: u64 },

    #[error("refusing to lock: no pre-authorized finalization signer is installed")]
    MissingPreAuth,

    #[error("phase out of order: {0}")]
    State(String),

    #[error("transaction construction failed: {0}")]
    Tx(#[from] tessera_tx::TxError),

    #[error("ledger client error: {0}")]
    Client(ClientError),
}

impl ProtocolError {
    /// Fold a client error into the protocol taxonomy: sequence races stay
    /// distinguishable from ordinary precondition rejections.
    pub fn classify(err: ClientError) -> Self {
        match err {
            ClientError::Rejected(reason) if reason.is_sequence_race() => Self::SequenceRace,
            ClientError::Rejected(reason) => Self::Precondition { reason },
            other => Self::Client(other),
        }
    }

    pub fn is_sequence_race(&self) -> bool {
        matches!(self, Self::SequenceRace)
    }
}

impl From<ClientError> for ProtocolError {
    fn from(err: ClientError) -> Self {
        Self::classify(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_sequence_classifies_as_race() {
        let err = ProtocolError::classify(ClientError::Rejected(RejectReason::BadSequence {
            current: 4,
            submitted: 3,
        }));
        assert!(err.is_sequence_race());
    }

    #[test]
    fn rejection_classifies_as_precondition() {
        let err = ProtocolError::classify(ClientError::Rejected(RejectReason::NoTrustline));
        assert!(matches!(
            err,
            ProtocolError::Precondition {
                reason: RejectReason::NoTrustline
            }
        ));
    }

    #[test]
    fn transport_stays_client_error() {
        let err = ProtocolError::classify(ClientError::Transport("connection refused".into()));
        assert!(matches!(err, ProtocolError::Client(_)));
    }
}
