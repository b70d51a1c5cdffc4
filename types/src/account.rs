//! Account control fields: thresholds, flags, signers, sequence numbers.

use crate::{PublicKey, TxHash};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum summed signer weight required per operation severity class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub low: u8,
    pub medium: u8,
    pub high: u8,
}

impl Thresholds {
    /// 255 on every class — no combination of weight-1 signers can ever
    /// reach it, which is the deliberate account-freeze state.
    pub const UNREACHABLE: Self = Self {
        low: 255,
        medium: 255,
        high: 255,
    };

    pub fn uniform(weight: u8) -> Self {
        Self {
            low: weight,
            medium: weight,
            high: weight,
        }
    }
}

impl Default for Thresholds {
    /// A fresh account answers to its master key alone.
    fn default() -> Self {
        Self::uniform(0)
    }
}

/// Issuer-side authorization flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountFlags {
    /// Holders need issuer approval before they can hold the asset.
    pub auth_required: bool,
    /// The issuer may revoke a previously granted authorization.
    pub auth_revocable: bool,
}

impl AccountFlags {
    pub const NONE: Self = Self {
        auth_required: false,
        auth_revocable: false,
    };

    pub fn required_and_revocable() -> Self {
        Self {
            auth_required: true,
            auth_revocable: true,
        }
    }

    /// Apply a set mask followed by a clear mask.
    pub fn apply(&self, set: Option<AccountFlags>, clear: Option<AccountFlags>) -> Self {
        let mut out = *self;
        if let Some(s) = set {
            out.auth_required |= s.auth_required;
            out.auth_revocable |= s.auth_revocable;
        }
        if let Some(c) = clear {
            out.auth_required &= !c.auth_required;
            out.auth_revocable &= !c.auth_revocable;
        }
        out
    }
}

/// What kind of key a signer entry holds.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignerKey {
    /// A live Ed25519 key that signs envelopes.
    Ed25519(PublicKey),
    /// The content hash of one specific future transaction. That exact
    /// transaction authorizes itself; the entry is removed once used.
    PreAuthTx(TxHash),
}

/// A weighted signer on an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
    pub key: SignerKey,
    pub weight: u8,
}

impl Signer {
    pub fn ed25519(key: PublicKey, weight: u8) -> Self {
        Self {
            key: SignerKey::Ed25519(key),
            weight,
        }
    }

    pub fn pre_auth(hash: TxHash, weight: u8) -> Self {
        Self {
            key: SignerKey::PreAuthTx(hash),
            weight,
        }
    }
}

/// A per-account, strictly increasing transaction counter.
///
/// A transaction is valid only at exactly `account.sequence.next()`; the
/// ledger consumes the number whether or not the operations succeed.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SequenceNumber(u64);

impl SequenceNumber {
    pub fn new(n: u64) -> Self {
        Self(n)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The sequence number the account's next transaction must carry.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_thresholds_exceed_any_committee() {
        let committee_weight = 4u32;
        assert!(u32::from(Thresholds::UNREACHABLE.high) > committee_weight);
    }

    #[test]
    fn flags_apply_set_then_clear() {
        let flags = AccountFlags::NONE.apply(Some(AccountFlags::required_and_revocable()), None);
        assert!(flags.auth_required && flags.auth_revocable);

        let cleared = flags.apply(
            None,
            Some(AccountFlags {
                auth_required: true,
                auth_revocable: false,
            }),
        );
        assert!(!cleared.auth_required);
        assert!(cleared.auth_revocable);
    }

    #[test]
    fn sequence_next_increments() {
        let seq = SequenceNumber::new(41);
        assert_eq!(seq.next(), SequenceNumber::new(42));
    }
}
