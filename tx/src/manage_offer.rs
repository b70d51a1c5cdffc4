//! ManageOffer: place, replace or cancel an exchange offer.
//!
//! The voting protocol uses offers as a commitment exchange: a voter's
//! standing offer selling 1 ballot for 1 candidate receipt at price 1 *is*
//! their vote. No price discovery happens; all protocol offers are 1:1.

use serde::{Deserialize, Serialize};
use tessera_types::{Amount, Asset, Price};

/// Offer id value meaning "create a new offer".
pub const NEW_OFFER: u64 = 0;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ManageOfferOp {
    pub selling: Asset,
    pub buying: Asset,
    /// Units of `selling` offered. 0 cancels the offer named by `offer_id`.
    pub amount: Amount,
    /// Units of `buying` wanted per unit of `selling`.
    pub price: Price,
    /// 0 creates a new offer; otherwise replaces/cancels an existing one.
    pub offer_id: u64,
}

impl ManageOfferOp {
    /// Create a brand-new offer.
    pub fn create(selling: Asset, buying: Asset, amount: Amount, price: Price) -> Self {
        Self {
            selling,
            buying,
            amount,
            price,
            offer_id: NEW_OFFER,
        }
    }

    /// Replace an existing offer in place, keeping its id.
    pub fn replace(offer_id: u64, selling: Asset, buying: Asset, amount: Amount, price: Price) -> Self {
        Self {
            selling,
            buying,
            amount,
            price,
            offer_id,
        }
    }

    /// Cancel an existing offer (amount 0).
    pub fn cancel(offer_id: u64, selling: Asset, buying: Asset, price: Price) -> Self {
        Self {
            selling,
            buying,
            amount: Amount::ZERO,
            price,
            offer_id,
        }
    }

    pub fn is_cancel(&self) -> bool {
        self.amount.is_zero()
    }
}
