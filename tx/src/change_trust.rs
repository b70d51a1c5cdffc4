//! ChangeTrust: holder-side trustline management.

use serde::{Deserialize, Serialize};
use tessera_types::{Amount, Asset};

/// Create or update the source account's trustline for `asset`.
///
/// A trustline must exist before any payment of the asset can be received.
/// The limit bounds the holdable balance — the tally reader later uses it as
/// the vote-count denominator. Limit 0 deletes an empty trustline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChangeTrustOp {
    pub asset: Asset,
    pub limit: Amount,
}

impl ChangeTrustOp {
    pub fn new(asset: Asset, limit: Amount) -> Self {
        Self { asset, limit }
    }
}
