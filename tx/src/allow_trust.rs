//! AllowTrust: issuer-side authorization toggle.

use serde::{Deserialize, Serialize};
use tessera_types::{AccountId, AssetCode};

/// Grant or revoke a holder's permission for an asset issued by the source
/// account.
///
/// Valid only when the issuing account has `auth_required` set. Revocation
/// (`authorize: false`) is how a holder's balance is frozen at finalization
/// time without the holder being online.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AllowTrustOp {
    /// The holder whose trustline is being toggled.
    pub trustor: AccountId,
    pub asset_code: AssetCode,
    pub authorize: bool,
}

impl AllowTrustOp {
    pub fn grant(trustor: AccountId, asset_code: AssetCode) -> Self {
        Self {
            trustor,
            asset_code,
            authorize: true,
        }
    }

    pub fn revoke(trustor: AccountId, asset_code: AssetCode) -> Self {
        Self {
            trustor,
            asset_code,
            authorize: false,
        }
    }
}
