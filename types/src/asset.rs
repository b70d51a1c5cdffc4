//! Asset identification: token codes and (code, issuer) pairs.

use crate::AccountId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum asset code length.
const MAX_CODE_LEN: usize = 12;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("asset code must be 1..={MAX_CODE_LEN} characters, got {0}")]
    BadLength(usize),

    #[error("asset code contains non-alphanumeric character {0:?}")]
    BadCharacter(char),
}

/// A short alphanumeric token code such as `VOTE` or `CANDA`.
///
/// Validated at construction; a malformed code is a configuration error
/// caught before any network call.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetCode(String);

impl AssetCode {
    pub fn new(code: impl Into<String>) -> Result<Self, AssetError> {
        let code = code.into();
        if code.is_empty() || code.len() > MAX_CODE_LEN {
            return Err(AssetError::BadLength(code.len()));
        }
        if let Some(c) = code.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(AssetError::BadCharacter(c));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AssetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetCode({})", self.0)
    }
}

impl fmt::Display for AssetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A ledger asset. Identity is the (code, issuer) pair; the native asset
/// pays fees and is never voted with.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Asset {
    Native,
    Credit { code: AssetCode, issuer: AccountId },
}

impl Asset {
    pub fn credit(code: AssetCode, issuer: AccountId) -> Self {
        Self::Credit { code, issuer }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }

    /// The issuing account, if this is a credit asset.
    pub fn issuer(&self) -> Option<&AccountId> {
        match self {
            Self::Native => None,
            Self::Credit { issuer, .. } => Some(issuer),
        }
    }

    /// The asset code, if this is a credit asset.
    pub fn code(&self) -> Option<&AssetCode> {
        match self {
            Self::Native => None,
            Self::Credit { code, .. } => Some(code),
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Credit { code, issuer } => write!(f, "{}:{}", code, issuer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_codes() {
        assert!(AssetCode::new("VOTE").is_ok());
        assert!(AssetCode::new("CANDA").is_ok());
        assert!(AssetCode::new("a1B2c3D4e5F6").is_ok());
    }

    #[test]
    fn empty_code_rejected() {
        assert_eq!(AssetCode::new(""), Err(AssetError::BadLength(0)));
    }

    #[test]
    fn long_code_rejected() {
        assert_eq!(
            AssetCode::new("THIRTEENCHARS"),
            Err(AssetError::BadLength(13))
        );
    }

    #[test]
    fn non_alphanumeric_rejected() {
        assert_eq!(
            AssetCode::new("VO TE"),
            Err(AssetError::BadCharacter(' '))
        );
    }

    #[test]
    fn asset_identity_is_code_and_issuer() {
        let code = AssetCode::new("VOTE").unwrap();
        let a = Asset::credit(code.clone(), AccountId::new("tsr_one"));
        let b = Asset::credit(code.clone(), AccountId::new("tsr_one"));
        let c = Asset::credit(code, AccountId::new("tsr_two"));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
