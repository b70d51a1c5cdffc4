//! Payment: token transfer.

use serde::{Deserialize, Serialize};
use tessera_types::{AccountId, Amount, Asset};

/// Transfer `amount` of `asset` from the source account to `destination`.
///
/// When the source is the asset's issuer the payment mints new units; when
/// the destination is the issuer the units are burned. The destination must
/// hold an authorized trustline with room under its limit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentOp {
    pub destination: AccountId,
    pub asset: Asset,
    pub amount: Amount,
}

impl PaymentOp {
    pub fn new(destination: AccountId, asset: Asset, amount: Amount) -> Self {
        Self {
            destination,
            asset,
            amount,
        }
    }
}
