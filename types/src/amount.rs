//! Token amount and offer price types.
//!
//! Amounts are whole token units stored as u64 — the voting protocol deals
//! in integral ballots and receipts, never fractions. Prices are exact
//! rationals compared by cross-multiplication to avoid floating point.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A token amount in whole units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);

    pub const fn new(units: u64) -> Self {
        Self(units)
    }

    pub fn units(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    pub fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }
}

impl Add for Amount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An exact rational price: `n` units of the buying asset per `d` units of
/// the selling asset.
///
/// The ballot exchange only ever uses 1:1, but offers carry the full price
/// so the ledger can refuse mismatched crossings.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Price {
    pub n: u32,
    pub d: u32,
}

impl Price {
    pub const ONE: Self = Self { n: 1, d: 1 };

    pub fn new(n: u32, d: u32) -> Self {
        Self { n, d }
    }

    /// The price seen from the opposite side of the book.
    pub fn inverted(&self) -> Self {
        Self {
            n: self.d,
            d: self.n,
        }
    }

    /// Whether two facing offers agree on price: this offer's price and the
    /// counter-offer's inverted price must be equal as rationals.
    pub fn crosses(&self, counter: &Price) -> bool {
        *self == counter.inverted()
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        // Cross-multiply in u64 so u32::MAX components cannot overflow.
        (self.n as u64) * (other.d as u64) == (other.n as u64) * (self.d as u64)
    }
}

impl Eq for Price {}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.n, self.d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_checked_math() {
        let a = Amount::new(3);
        let b = Amount::new(2);
        assert_eq!(a.checked_add(b), Some(Amount::new(5)));
        assert_eq!(a.checked_sub(b), Some(Amount::ONE));
        assert_eq!(b.checked_sub(a), None);
        assert_eq!(b.saturating_sub(a), Amount::ZERO);
    }

    #[test]
    fn amount_overflow_is_none() {
        assert_eq!(Amount::new(u64::MAX).checked_add(Amount::ONE), None);
    }

    #[test]
    fn price_equality_is_rational() {
        assert_eq!(Price::new(1, 1), Price::new(2, 2));
        assert_ne!(Price::new(1, 2), Price::new(2, 1));
    }

    #[test]
    fn price_crossing() {
        assert!(Price::ONE.crosses(&Price::ONE));
        assert!(Price::new(1, 2).crosses(&Price::new(2, 1)));
        assert!(!Price::new(1, 2).crosses(&Price::new(1, 2)));
    }
}
