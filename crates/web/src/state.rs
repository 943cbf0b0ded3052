//! Application state container.
//!
//! `Storefront` owns every store and is the only place intents are reduced.
//! The rendering layer receives it by injection (Leptos context in the browser,
//! a plain value in tests) and reads through typed accessors.

use chrono::Utc;

use storefront_cart::Cart;
use storefront_catalog::{
    CatalogSource, CatalogStatus, CatalogStore, CategoryFilter, FilterSelection, LoadOutcome,
    PriceRange, Product, category_options, filter_products,
};
use storefront_core::{Aggregate, DomainResult, OrderRef, ProductId};

use crate::checkout::{CheckoutCommand, CheckoutEvent, CheckoutFlow, DeliveryDetails, Receipt, SubmitDelivery};
use crate::config::StorefrontConfig;
use crate::view::{CartView, ListingView, PageView, ProductCard, price_range_options};

/// A named user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    LoadCatalog,
    CatalogLoaded(LoadOutcome),
    AddToCart(Product),
    RemoveFromCart(ProductId),
    DiscardFromCart(ProductId),
    SelectCategory(CategoryFilter),
    SelectPriceRange(PriceRange),
    ResetFilters,
    ToggleCart,
    BuyNow,
    CancelDelivery,
    SubmitDelivery(DeliveryDetails),
}

impl Intent {
    fn name(&self) -> &'static str {
        match self {
            Intent::LoadCatalog => "load_catalog",
            Intent::CatalogLoaded(_) => "catalog_loaded",
            Intent::AddToCart(_) => "add_to_cart",
            Intent::RemoveFromCart(_) => "remove_from_cart",
            Intent::DiscardFromCart(_) => "discard_from_cart",
            Intent::SelectCategory(_) => "select_category",
            Intent::SelectPriceRange(_) => "select_price_range",
            Intent::ResetFilters => "reset_filters",
            Intent::ToggleCart => "toggle_cart",
            Intent::BuyNow => "buy_now",
            Intent::CancelDelivery => "cancel_delivery",
            Intent::SubmitDelivery(_) => "submit_delivery",
        }
    }
}

/// Side effect requested by a reducer, to be run by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the catalog once and dispatch `Intent::CatalogLoaded`.
    FetchCatalog,
}

/// What a dispatch produced besides the state change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatched {
    pub effects: Vec<Effect>,
    pub receipt: Option<Receipt>,
}

#[derive(Debug, Clone)]
pub struct Storefront {
    catalog: CatalogStore,
    cart: Cart,
    filter: FilterSelection,
    checkout: CheckoutFlow,
    preview_len: usize,
}

impl Default for Storefront {
    fn default() -> Self {
        Self::new()
    }
}

impl Storefront {
    pub fn new() -> Self {
        Self::with_config(&StorefrontConfig::default())
    }

    pub fn with_config(config: &StorefrontConfig) -> Self {
        Self {
            catalog: CatalogStore::new(),
            cart: Cart::new(),
            filter: FilterSelection::default(),
            checkout: CheckoutFlow::new(),
            preview_len: config.description_preview_len,
        }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn filter(&self) -> &FilterSelection {
        &self.filter
    }

    pub fn checkout(&self) -> &CheckoutFlow {
        &self.checkout
    }

    /// Catalog products passing the current filters.
    pub fn filtered_products(&self) -> Vec<&Product> {
        filter_products(self.catalog.products(), &self.filter)
    }

    pub fn category_options(&self) -> Vec<CategoryFilter> {
        category_options(self.catalog.products())
    }

    pub fn page(&self) -> PageView {
        match self.catalog.status() {
            CatalogStatus::Loading => PageView::Loading,
            CatalogStatus::Failed { message } => PageView::Error {
                message: message.clone(),
            },
            CatalogStatus::NotStarted | CatalogStatus::Ready => PageView::Listing(ListingView {
                categories: self.category_options(),
                price_ranges: price_range_options(),
                selection: self.filter.clone(),
                products: self
                    .filtered_products()
                    .into_iter()
                    .map(|p| ProductCard::new(p, self.preview_len))
                    .collect(),
            }),
        }
    }

    pub fn cart_view(&self) -> CartView {
        CartView::new(&self.cart)
    }

    /// Reduce one intent into the owning store.
    pub fn dispatch(&mut self, intent: Intent) -> DomainResult<Dispatched> {
        tracing::debug!(intent = intent.name(), "dispatch");

        let mut out = Dispatched::default();
        match intent {
            Intent::LoadCatalog => {
                if self.catalog.begin_load() {
                    out.effects.push(Effect::FetchCatalog);
                }
            }
            Intent::CatalogLoaded(outcome) => self.catalog.resolve(outcome),
            Intent::AddToCart(product) => {
                self.cart.add_to_cart(&product);
            }
            Intent::RemoveFromCart(product_id) => {
                self.cart.remove_from_cart(product_id);
            }
            Intent::DiscardFromCart(product_id) => {
                self.cart.discard_item(product_id);
            }
            Intent::SelectCategory(category) => self.filter.category = category,
            Intent::SelectPriceRange(range) => self.filter.price_range = range,
            Intent::ResetFilters => self.filter = FilterSelection::default(),
            Intent::ToggleCart => {
                self.checkout.execute(&CheckoutCommand::ToggleCart)?;
            }
            Intent::BuyNow => {
                self.checkout.execute(&CheckoutCommand::BuyNow)?;
            }
            Intent::CancelDelivery => {
                self.checkout.execute(&CheckoutCommand::CancelDelivery)?;
            }
            Intent::SubmitDelivery(details) => {
                out.receipt = self.submit_delivery(details)?;
            }
        }
        Ok(out)
    }

    /// Run effects returned by `dispatch`, feeding results back in.
    pub async fn run_effects<S>(&mut self, effects: Vec<Effect>, source: &S) -> DomainResult<()>
    where
        S: CatalogSource + ?Sized,
    {
        for effect in effects {
            match effect {
                Effect::FetchCatalog => {
                    let outcome = source.fetch_products().await;
                    self.dispatch(Intent::CatalogLoaded(outcome))?;
                }
            }
        }
        Ok(())
    }

    /// `LoadCatalog` followed by its effects.
    pub async fn load_catalog<S>(&mut self, source: &S) -> DomainResult<()>
    where
        S: CatalogSource + ?Sized,
    {
        let dispatched = self.dispatch(Intent::LoadCatalog)?;
        self.run_effects(dispatched.effects, source).await
    }

    // The cart is left as is after checkout.
    fn submit_delivery(&mut self, details: DeliveryDetails) -> DomainResult<Option<Receipt>> {
        let command = CheckoutCommand::SubmitDelivery(SubmitDelivery {
            details,
            order_ref: OrderRef::new(),
            total_items: self.cart.total_items(),
            total_price: self.cart.total_price(),
            occurred_at: Utc::now(),
        });

        let events = self.checkout.execute(&command).inspect_err(|err| {
            tracing::info!(error = %err, "checkout rejected");
        })?;

        let receipt = events.into_iter().find_map(|event| match event {
            CheckoutEvent::CheckoutCompleted(receipt) => Some(receipt),
            _ => None,
        });
        if let Some(receipt) = &receipt {
            tracing::info!(
                order_ref = %receipt.order_ref,
                total_items = receipt.total_items,
                total = %receipt.total_price,
                "mock checkout completed"
            );
        }
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::CheckoutState;
    use storefront_catalog::{CatalogError, StaticCatalogSource};
    use storefront_core::{DomainError, Price};

    fn product(id: u64, dollars: u64, category: &str) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Product {id}"),
            Price::from_whole_dollars(dollars),
            category,
        )
        .with_description("A very fine product")
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, 10, "electronics"),
            product(2, 5, "jewelery"),
            product(3, 75, "electronics"),
            product(4, 150, "men's clothing"),
        ]
    }

    fn details() -> DeliveryDetails {
        DeliveryDetails::new("Grace Hopper", "1 Navy Way", "Arlington", "22202")
    }

    #[test]
    fn load_catalog_requests_a_single_fetch() {
        let mut store = Storefront::new();
        let first = store.dispatch(Intent::LoadCatalog).unwrap();
        let second = store.dispatch(Intent::LoadCatalog).unwrap();

        assert_eq!(first.effects, vec![Effect::FetchCatalog]);
        assert!(second.effects.is_empty());
        assert_eq!(store.page(), PageView::Loading);
    }

    #[test]
    fn failed_load_renders_error_page() {
        let mut store = Storefront::new();
        store.dispatch(Intent::LoadCatalog).unwrap();
        store
            .dispatch(Intent::CatalogLoaded(Err(CatalogError::new("Network Error"))))
            .unwrap();

        assert_eq!(
            store.page(),
            PageView::Error {
                message: "Network Error".to_string()
            }
        );
    }

    #[test]
    fn listing_applies_filters() {
        let mut store = Storefront::new();
        store.dispatch(Intent::LoadCatalog).unwrap();
        store.dispatch(Intent::CatalogLoaded(Ok(catalog()))).unwrap();
        store
            .dispatch(Intent::SelectCategory(CategoryFilter::from("electronics")))
            .unwrap();
        store.dispatch(Intent::SelectPriceRange(PriceRange::From50To100)).unwrap();

        match store.page() {
            PageView::Listing(listing) => {
                let ids: Vec<u64> = listing.products.iter().map(|c| c.id.get()).collect();
                assert_eq!(ids, vec![3]);
                let categories: Vec<String> = listing.categories.into_iter().map(String::from).collect();
                assert_eq!(categories, vec!["all", "electronics", "jewelery", "men's clothing"]);
                assert_eq!(listing.price_ranges.len(), 4);
            }
            other => panic!("Expected listing, got {other:?}"),
        }

        store.dispatch(Intent::ResetFilters).unwrap();
        assert_eq!(store.filtered_products().len(), 4);
    }

    #[test]
    fn cart_intents_update_totals() {
        let mut store = Storefront::new();
        let items = catalog();
        store.dispatch(Intent::AddToCart(items[0].clone())).unwrap();
        store.dispatch(Intent::AddToCart(items[0].clone())).unwrap();
        store.dispatch(Intent::AddToCart(items[1].clone())).unwrap();

        assert_eq!(store.cart().total_items(), 3);
        assert_eq!(store.cart().total_price(), Price::from_cents(2_500));

        store.dispatch(Intent::RemoveFromCart(items[0].id)).unwrap();
        store.dispatch(Intent::DiscardFromCart(items[1].id)).unwrap();
        store.dispatch(Intent::RemoveFromCart(ProductId::new(99))).unwrap();
        assert_eq!(store.cart().total_items(), 1);
    }

    #[test]
    fn cart_can_be_opened_while_empty() {
        let mut store = Storefront::new();
        store.dispatch(Intent::ToggleCart).unwrap();
        assert_eq!(store.checkout().state(), CheckoutState::CartOpen);
        assert!(store.cart_view().empty_message.is_some());
    }

    #[test]
    fn checkout_presents_total_and_keeps_cart() {
        let mut store = Storefront::new();
        let items = catalog();
        store.dispatch(Intent::AddToCart(items[0].clone())).unwrap();
        store.dispatch(Intent::AddToCart(items[0].clone())).unwrap();
        store.dispatch(Intent::AddToCart(items[1].clone())).unwrap();

        store.dispatch(Intent::ToggleCart).unwrap();
        store.dispatch(Intent::BuyNow).unwrap();
        let dispatched = store.dispatch(Intent::SubmitDelivery(details())).unwrap();

        let receipt = dispatched.receipt.expect("receipt");
        assert_eq!(receipt.total_price.to_string(), "$25.00");
        assert_eq!(receipt.delivery, details());
        assert_eq!(store.checkout().state(), CheckoutState::Browsing);
        assert_eq!(store.cart().total_items(), 3);
        assert_eq!(store.checkout().last_receipt(), Some(&receipt));
    }

    #[test]
    fn incomplete_delivery_form_is_rejected() {
        let mut store = Storefront::new();
        store.dispatch(Intent::BuyNow).unwrap();

        let err = store
            .dispatch(Intent::SubmitDelivery(DeliveryDetails::new("", "", "", "")))
            .unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error"),
        }
        assert!(store.checkout().is_delivery_form_open());
    }

    #[test]
    fn preview_length_comes_from_config() {
        let config = StorefrontConfig {
            description_preview_len: 6,
            ..StorefrontConfig::default()
        };
        let mut store = Storefront::with_config(&config);
        store.dispatch(Intent::LoadCatalog).unwrap();
        store.dispatch(Intent::CatalogLoaded(Ok(catalog()))).unwrap();

        match store.page() {
            PageView::Listing(listing) => {
                assert_eq!(listing.products[0].description_preview, "A very...");
            }
            other => panic!("Expected listing, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn load_catalog_runs_fetch_effect() {
        let source = StaticCatalogSource::new(catalog());
        let mut store = Storefront::new();

        store.load_catalog(&source).await.unwrap();
        store.load_catalog(&source).await.unwrap();

        assert_eq!(source.fetch_calls(), 1);
        assert_eq!(store.catalog().status(), &CatalogStatus::Ready);
        assert_eq!(store.filtered_products().len(), 4);
    }
}
