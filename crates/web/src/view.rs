//! View models handed to the rendering layer. Built on read, never stored.

use serde::Serialize;

use storefront_cart::{Cart, CartItem};
use storefront_catalog::{CategoryFilter, FilterSelection, PriceRange, Product};
use storefront_core::ProductId;

pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty";

/// One product tile on the listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub title: String,
    pub category: String,
    pub description_preview: String,
    pub price_label: String,
    pub image: String,
}

impl ProductCard {
    pub fn new(product: &Product, preview_len: usize) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            category: product.category.clone(),
            description_preview: preview(&product.description, preview_len),
            price_label: product.price.to_string(),
            image: product.image.clone(),
        }
    }
}

/// First `len` characters of `text` followed by `...`.
pub fn preview(text: &str, len: usize) -> String {
    let mut out: String = text.chars().take(len).collect();
    out.push_str("...");
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceRangeOption {
    pub value: PriceRange,
    pub label: &'static str,
}

/// Listing page with its filter controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingView {
    pub categories: Vec<CategoryFilter>,
    pub price_ranges: Vec<PriceRangeOption>,
    pub selection: FilterSelection,
    pub products: Vec<ProductCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageView {
    Loading,
    Error { message: String },
    Listing(ListingView),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub title: String,
    pub quantity: u32,
    pub unit_price_label: String,
    pub line_total_label: String,
}

impl From<&CartItem> for CartLineView {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id,
            title: item.title.clone(),
            quantity: item.quantity,
            unit_price_label: item.price.to_string(),
            line_total_label: item.line_total().to_string(),
        }
    }
}

/// Cart panel. Renders even when the cart is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total_items: u64,
    pub total_price_label: String,
    pub empty_message: Option<&'static str>,
}

impl CartView {
    pub fn new(cart: &Cart) -> Self {
        Self {
            lines: cart.items().iter().map(CartLineView::from).collect(),
            total_items: cart.total_items(),
            total_price_label: cart.total_price().to_string(),
            empty_message: cart.is_empty().then_some(EMPTY_CART_MESSAGE),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

pub fn price_range_options() -> Vec<PriceRangeOption> {
    PriceRange::ALL_RANGES
        .into_iter()
        .map(|value| PriceRangeOption {
            value,
            label: value.label(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::Price;

    #[test]
    fn preview_truncates_on_char_boundaries() {
        assert_eq!(preview("abcdef", 3), "abc...");
        assert_eq!(preview("ab", 3), "ab...");
        assert_eq!(preview("żółw", 2), "żó...");
        assert_eq!(preview("", 100), "...");
    }

    #[test]
    fn product_card_formats_price() {
        let product = Product::new(ProductId::new(1), "Backpack", Price::from_cents(10_995), "bags")
            .with_description("x".repeat(150))
            .with_image("https://example.test/p.jpg");
        let card = ProductCard::new(&product, 100);

        assert_eq!(card.price_label, "$109.95");
        assert_eq!(card.description_preview.len(), 103);
        assert_eq!(card.image, "https://example.test/p.jpg");
    }

    #[test]
    fn empty_cart_view_has_message() {
        let view = CartView::new(&Cart::new());
        assert!(view.is_empty());
        assert_eq!(view.empty_message, Some(EMPTY_CART_MESSAGE));
        assert_eq!(view.total_price_label, "$0.00");
    }

    #[test]
    fn cart_view_lines_and_totals() {
        let mut cart = Cart::new();
        let p1 = Product::new(ProductId::new(1), "A", Price::from_whole_dollars(10), "c");
        let p2 = Product::new(ProductId::new(2), "B", Price::from_whole_dollars(5), "c");
        cart.add_to_cart(&p1);
        cart.add_to_cart(&p1);
        cart.add_to_cart(&p2);

        let view = CartView::new(&cart);
        assert_eq!(view.empty_message, None);
        assert_eq!(view.total_items, 3);
        assert_eq!(view.total_price_label, "$25.00");
        assert_eq!(view.lines[0].line_total_label, "$20.00");
        assert_eq!(view.lines[1].unit_price_label, "$5.00");
    }

    #[test]
    fn price_range_options_have_labels_in_order() {
        let labels: Vec<&str> = price_range_options().iter().map(|o| o.label).collect();
        assert_eq!(labels, vec!["All Prices", "Under $50", "$50 to $100", "Above $100"]);
    }
}
