//! Cart domain module.
//!
//! This crate contains the shopping cart store: per-product quantities and the
//! totals derived from them, implemented purely as deterministic domain logic
//! (no IO, no rendering, no storage).

pub mod cart;

pub use cart::{
    AddToCart, Cart, CartCommand, CartEvent, CartItem, DiscardItem, ItemAdded, RemoveFromCart,
};
