//! Strongly-typed identifiers used across the storefront.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a catalog product, as assigned by the catalog provider.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| DomainError::invalid_id(format!("ProductId: {e}")))
    }
}

/// Reference number of a completed (mock) checkout.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderRef(Uuid);

impl OrderRef {
    /// A fresh time-ordered (UUIDv7) reference.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OrderRef {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for OrderRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for OrderRef {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(s.trim())
            .map(Self)
            .map_err(|e| DomainError::invalid_id(format!("OrderRef: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_parses_decimal_text() {
        assert_eq!("17".parse::<ProductId>().unwrap(), ProductId::new(17));
        assert_eq!(" 3 ".parse::<ProductId>().unwrap(), ProductId::new(3));
    }

    #[test]
    fn product_id_rejects_garbage() {
        match "abc".parse::<ProductId>().unwrap_err() {
            DomainError::InvalidId(msg) => assert!(msg.starts_with("ProductId")),
            other => panic!("Expected InvalidId, got {other:?}"),
        }
    }

    #[test]
    fn product_id_is_a_bare_number_on_the_wire() {
        let json = serde_json::to_string(&ProductId::new(5)).unwrap();
        assert_eq!(json, "5");
    }

    #[test]
    fn order_refs_are_unique_and_round_trip_through_text() {
        let a = OrderRef::new();
        let b = OrderRef::new();
        assert_ne!(a, b);
        assert_eq!(a.to_string().parse::<OrderRef>().unwrap(), a);
    }

    #[test]
    fn order_ref_rejects_garbage() {
        match "not-a-uuid".parse::<OrderRef>().unwrap_err() {
            DomainError::InvalidId(msg) => assert!(msg.starts_with("OrderRef")),
            other => panic!("Expected InvalidId, got {other:?}"),
        }
    }
}
