//! Network identifier.

use serde::{Deserialize, Serialize};

/// Identifies which tessera network a transaction is bound to.
///
/// The passphrase is hashed into every transaction hash, so an envelope
/// signed for one network can never replay on another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkId {
    /// The production network.
    Live,
    /// The public test network.
    Test,
    /// Local development network.
    Dev,
}

impl NetworkId {
    /// Domain-separation passphrase for transaction hashing.
    pub fn passphrase(&self) -> &'static str {
        match self {
            Self::Live => "tessera live network ; March 2025",
            Self::Test => "tessera test network ; March 2025",
            Self::Dev => "tessera dev network",
        }
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Test => "test",
            Self::Dev => "dev",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passphrases_are_distinct() {
        assert_ne!(NetworkId::Live.passphrase(), NetworkId::Test.passphrase());
        assert_ne!(NetworkId::Test.passphrase(), NetworkId::Dev.passphrase());
    }
}
