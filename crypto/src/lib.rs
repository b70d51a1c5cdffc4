//! Cryptographic primitives for the tessera voting protocol.
//!
//! - **Ed25519** for envelope signing and signature verification
//! - **Blake2b** for transaction content hashing
//! - Account-address derivation with `tsr_` prefix and base32 encoding

pub mod address;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::{decode_account_id, derive_account_id, validate_account_id};
pub use hash::{blake2b_256, blake2b_256_multi};
pub use keys::{
    generate_keypair, keypair_from_secret_hex, keypair_from_seed, public_from_seed, KeyError,
};
pub use sign::{sign_message, verify_signature};
