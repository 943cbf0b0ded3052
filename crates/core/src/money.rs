//! Prices, stored as whole cents.

use core::iter::Sum;
use core::ops::Add;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Non-negative amount of money in the smallest currency unit (cents).
///
/// On the wire a price is a decimal number of dollars (`109.95`), which is how
/// the catalog provider sends it. Internally it is an integer so that bucket
/// boundaries and totals are exact.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u64);

impl ValueObject for Price {}

impl Price {
    pub const ZERO: Price = Price(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn from_whole_dollars(dollars: u64) -> Self {
        Self(dollars * 100)
    }

    /// Parse a decimal dollar amount, rounding to the nearest cent.
    pub fn from_dollars(dollars: f64) -> DomainResult<Self> {
        if !dollars.is_finite() {
            return Err(DomainError::validation("price must be a finite number"));
        }
        if dollars < 0.0 {
            return Err(DomainError::validation(format!(
                "price cannot be negative (got {dollars})"
            )));
        }
        let cents = (dollars * 100.0).round();
        if cents > u64::MAX as f64 {
            return Err(DomainError::validation("price is out of range"));
        }
        Ok(Self(cents as u64))
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub fn as_dollars(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Price of `quantity` units. Saturates instead of overflowing.
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_dollars())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let dollars = f64::deserialize(deserializer)?;
        Price::from_dollars(dollars).map_err(serde::de::Error::custom)
    }
}
