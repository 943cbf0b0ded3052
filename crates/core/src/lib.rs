//! `storefront-core`: domain building blocks shared by the storefront stores.
//!
//! This crate contains **pure domain** primitives (no IO, no rendering).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use aggregate::Aggregate;
pub use entity::{Entity, first_duplicate};
pub use error::{DomainError, DomainResult};
pub use id::{OrderRef, ProductId};
pub use money::Price;
pub use value_object::ValueObject;
