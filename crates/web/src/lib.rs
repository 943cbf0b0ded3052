//! `storefront-web`
//!
//! **Responsibility:** the storefront application layer.
//!
//! This crate provides:
//! - `Storefront`, the owned state container every intent goes through
//! - the mock checkout flow
//! - view models derived from the stores on read
//! - configuration
//! - the Leptos browser frontend (wasm32 only)

pub mod checkout;
pub mod config;
pub mod state;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use checkout::{CheckoutFlow, CheckoutState, DeliveryDetails, Receipt};
pub use config::StorefrontConfig;
pub use state::{Dispatched, Effect, Intent, Storefront};
pub use view::{CartView, PageView, ProductCard};
