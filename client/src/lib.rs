//! Ledger access for the tessera voting protocol.
//!
//! The protocol core talks to the ledger exclusively through the
//! [`LedgerClient`] trait — a narrow seam covering the only four calls the
//! protocol needs (load account, submit envelope, list offers, read
//! balances).
//! `HorizonClient` is the HTTP implementation; the `tessera-nullables`
//! crate provides the deterministic in-memory one used by tests.

pub mod error;
pub mod friendbot;
pub mod horizon;
pub mod ledger;

pub use error::{ClientError, RejectReason};
pub use friendbot::Friendbot;
pub use horizon::HorizonClient;
pub use ledger::{AccountRecord, BalanceRecord, LedgerClient, OfferRecord, SubmitResult};
