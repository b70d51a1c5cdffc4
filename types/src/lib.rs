//! Fundamental types for the tessera voting protocol.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: keys, hashes, account addresses, token amounts and assets,
//! account control fields (thresholds, flags, signers), sequence numbers,
//! and timestamps.

pub mod account;
pub mod address;
pub mod amount;
pub mod asset;
pub mod hash;
pub mod keys;
pub mod network;
pub mod time;

pub use account::{AccountFlags, SequenceNumber, Signer, SignerKey, Thresholds};
pub use address::AccountId;
pub use amount::{Amount, Price};
pub use asset::{Asset, AssetCode, AssetError};
pub use hash::TxHash;
pub use keys::{KeyPair, PublicKey, SecretSeed, Signature};
pub use network::NetworkId;
pub use time::{TimeBounds, Timestamp};
