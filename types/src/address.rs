//! Account identifier newtype.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A ledger account identifier: `tsr_` + base32(public key) + checksum.
///
/// Derive with `tessera_crypto::derive_account_id` and validate with
/// `tessera_crypto::decode_account_id`. The newtype itself carries no
/// validity guarantee.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Addresses are long; keep debug output readable.
        write!(f, "AccountId({}..)", &self.0[..self.0.len().min(12)])
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
