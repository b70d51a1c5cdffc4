//! Ledger operations and transactions for the tessera voting protocol.
//!
//! Operation types:
//! - **SetOptions**: signer set, thresholds, master weight, issuer flags
//! - **ChangeTrust**: holder-side trustline create/update/delete
//! - **AllowTrust**: issuer-side authorization grant/revocation
//! - **Payment**: token transfer (issuer source mints, issuer destination burns)
//! - **ManageOffer**: place, replace or cancel an exchange offer
//!
//! A [`Transaction`] is a sequence-numbered bundle of operations from one
//! source account, optionally time-bounded. Its content hash (network
//! passphrase + body, never signatures) is what pre-authorized signers
//! commit to. Envelopes carry the signatures.

pub mod allow_trust;
pub mod builder;
pub mod change_trust;
pub mod envelope;
pub mod error;
pub mod manage_offer;
pub mod payment;
pub mod set_options;
pub mod validation;

pub use builder::TransactionBuilder;
pub use envelope::{tx_hash, DecoratedSignature, TransactionEnvelope};
pub use error::TxError;

use serde::{Deserialize, Serialize};
use tessera_types::{AccountId, Amount, SequenceNumber, Thresholds, TimeBounds};

/// Fee charged per operation, in raw native units.
pub const BASE_FEE: u64 = 100;

/// Maximum operations per transaction.
pub const MAX_OPERATIONS: usize = 20;

/// Severity class of an operation; each class has its own signing threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ThresholdLevel {
    Low,
    Medium,
    High,
}

impl ThresholdLevel {
    /// The summed signer weight an account requires for this class.
    pub fn required_weight(&self, thresholds: &Thresholds) -> u8 {
        match self {
            Self::Low => thresholds.low,
            Self::Medium => thresholds.medium,
            Self::High => thresholds.high,
        }
    }
}

/// The unified operation enum.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Operation {
    SetOptions(set_options::SetOptionsOp),
    ChangeTrust(change_trust::ChangeTrustOp),
    AllowTrust(allow_trust::AllowTrustOp),
    Payment(payment::PaymentOp),
    ManageOffer(manage_offer::ManageOfferOp),
}

impl Operation {
    /// Which signing threshold this operation is checked against.
    pub fn threshold_level(&self) -> ThresholdLevel {
        match self {
            Self::SetOptions(_) => ThresholdLevel::High,
            Self::AllowTrust(_) => ThresholdLevel::Low,
            Self::ChangeTrust(_) | Self::Payment(_) | Self::ManageOffer(_) => {
                ThresholdLevel::Medium
            }
        }
    }
}

/// A sequence-numbered bundle of operations from one source account.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transaction {
    pub source: AccountId,
    pub sequence: SequenceNumber,
    /// Total fee in raw native units ([`BASE_FEE`] × operation count).
    pub fee: Amount,
    pub time_bounds: Option<TimeBounds>,
    pub operations: Vec<Operation>,
}

impl Transaction {
    /// The highest threshold class among this transaction's operations.
    pub fn max_threshold_level(&self) -> ThresholdLevel {
        self.operations
            .iter()
            .map(Operation::threshold_level)
            .max()
            .unwrap_or(ThresholdLevel::Low)
    }
}
