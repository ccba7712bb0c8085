//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. The cart is
//! single-currency, so there is no currency dimension; values serialize
//! as bare numbers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A monetary value in the smallest currency unit (cents).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money {
    /// Amount in cents.
    pub cents: i64,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(cents: i64) -> Self {
        Self { cents }
    }

    /// The zero amount.
    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Check whether the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// Multiply by a quantity, returning `None` on overflow.
    pub fn checked_mul(self, quantity: i64) -> Option<Money> {
        self.cents.checked_mul(quantity).map(Money::new)
    }

    /// Add another amount, returning `None` on overflow.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.cents.checked_add(other.cents).map(Money::new)
    }

    /// Sum an iterator of amounts, returning `None` on overflow.
    pub fn try_sum<'a>(amounts: impl Iterator<Item = &'a Money>) -> Option<Money> {
        amounts.fold(Some(Money::zero()), |acc, m| acc?.checked_add(*m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}
