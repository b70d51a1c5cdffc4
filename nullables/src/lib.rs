//! Nullable infrastructure for deterministic testing.
//!
//! External dependencies of the protocol core are abstracted behind traits;
//! this crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! `NullLedger` is a full in-memory implementation of
//! `tessera_client::LedgerClient` — sequence numbers, fees, weighted
//! signature thresholds, pre-authorized hash signers, trustlines,
//! authorization flags, offer crossing and time bounds all behave as the
//! real ledger's do, under a clock that only moves when told to.

pub mod clock;
pub mod ledger;

pub use clock::NullClock;
pub use ledger::NullLedger;
