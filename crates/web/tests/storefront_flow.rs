use storefront_catalog::{CatalogStatus, CategoryFilter, JsonCatalogSource, PriceRange, StaticCatalogSource};
use storefront_core::{Price, ProductId};
use storefront_web::{CheckoutState, DeliveryDetails, Intent, PageView, Storefront, StorefrontConfig};

const CATALOG_JSON: &str = r#"[
    {"id": 1, "title": "Fjallraven Backpack", "price": 109.95, "description": "Fits 15 inch laptops", "category": "men's clothing", "image": "https://example.test/1.jpg", "rating": {"rate": 3.9, "count": 120}},
    {"id": 2, "title": "Slim Fit T-Shirt", "price": 22.3, "description": "Slim-fitting style", "category": "men's clothing", "image": "https://example.test/2.jpg"},
    {"id": 3, "title": "Gold Bracelet", "price": 50, "description": "Dragon station chain", "category": "jewelery", "image": "https://example.test/3.jpg"},
    {"id": 4, "title": "Portable Drive", "price": 100, "description": "USB 3.0", "category": "electronics", "image": "https://example.test/4.jpg"},
    {"id": 5, "title": "Monitor", "price": 999.99, "description": "49 inch", "category": "electronics", "image": "https://example.test/5.jpg"}
]"#;

async fn loaded_storefront() -> Storefront {
    let config = StorefrontConfig::default();
    config.init_tracing();

    let mut store = Storefront::with_config(&config);
    store
        .load_catalog(&JsonCatalogSource::new(CATALOG_JSON))
        .await
        .expect("load catalog");
    store
}

fn listed_ids(store: &Storefront) -> Vec<u64> {
    match store.page() {
        PageView::Listing(listing) => listing.products.iter().map(|c| c.id.get()).collect(),
        other => panic!("Expected listing page, got {other:?}"),
    }
}

#[tokio::test]
async fn browse_filter_and_checkout() {
    let mut store = loaded_storefront().await;
    assert_eq!(store.catalog().status(), &CatalogStatus::Ready);
    assert_eq!(listed_ids(&store), vec![1, 2, 3, 4, 5]);

    store
        .dispatch(Intent::SelectPriceRange(PriceRange::From50To100))
        .unwrap();
    assert_eq!(listed_ids(&store), vec![3, 4]);

    store
        .dispatch(Intent::SelectCategory(CategoryFilter::from("electronics")))
        .unwrap();
    assert_eq!(listed_ids(&store), vec![4]);

    store.dispatch(Intent::ResetFilters).unwrap();

    let backpack = store.catalog().products()[0].clone();
    let shirt = store.catalog().products()[1].clone();
    store.dispatch(Intent::AddToCart(backpack.clone())).unwrap();
    store.dispatch(Intent::AddToCart(shirt.clone())).unwrap();
    store.dispatch(Intent::AddToCart(shirt.clone())).unwrap();

    // 109.95 + 2 * 22.30
    assert_eq!(store.cart().total_price(), Price::from_cents(15_455));
    assert_eq!(store.cart_view().total_price_label, "$154.55");

    store.dispatch(Intent::ToggleCart).unwrap();
    assert_eq!(store.checkout().state(), CheckoutState::CartOpen);
    store.dispatch(Intent::BuyNow).unwrap();
    assert_eq!(store.checkout().state(), CheckoutState::DeliveryFormOpen);

    let receipt = store
        .dispatch(Intent::SubmitDelivery(DeliveryDetails::new(
            "Ada Lovelace",
            "12 St James's Square",
            "London",
            "SW1Y 4JH",
        )))
        .unwrap()
        .receipt
        .expect("receipt");

    assert_eq!(receipt.total_items, 3);
    assert_eq!(receipt.total_price.to_string(), "$154.55");
    assert_eq!(store.checkout().state(), CheckoutState::Browsing);
    // Cart contents survive a completed checkout.
    assert_eq!(store.cart().total_items(), 3);
}

#[tokio::test]
async fn catalog_fetch_happens_once() {
    let source = StaticCatalogSource::new(vec![]);
    let mut store = Storefront::new();

    let first = store.dispatch(Intent::LoadCatalog).unwrap();
    assert_eq!(store.catalog().status(), &CatalogStatus::Loading);
    let second = store.dispatch(Intent::LoadCatalog).unwrap();
    assert!(second.effects.is_empty());

    store.run_effects(first.effects, &source).await.unwrap();
    store.load_catalog(&source).await.unwrap();

    assert_eq!(source.fetch_calls(), 1);
    assert_eq!(store.catalog().status(), &CatalogStatus::Ready);
}

#[tokio::test]
async fn failed_fetch_is_terminal() {
    let source = StaticCatalogSource::failing("Request failed with status code 500");
    let mut store = Storefront::new();

    store.load_catalog(&source).await.unwrap();
    store.load_catalog(&source).await.unwrap();

    assert_eq!(source.fetch_calls(), 1);
    assert_eq!(
        store.page(),
        PageView::Error {
            message: "Request failed with status code 500".to_string()
        }
    );
}

#[tokio::test]
async fn malformed_catalog_payload_fails_the_load() {
    let mut store = Storefront::new();
    store
        .load_catalog(&JsonCatalogSource::new("<html>502 Bad Gateway</html>"))
        .await
        .unwrap();

    match store.catalog().status() {
        CatalogStatus::Failed { message } => assert!(message.starts_with("invalid catalog payload")),
        other => panic!("Expected Failed status, got {other:?}"),
    }
}

#[tokio::test]
async fn removing_unknown_products_is_harmless() {
    let mut store = loaded_storefront().await;
    let before = store.cart().clone();

    store.dispatch(Intent::RemoveFromCart(ProductId::new(42))).unwrap();
    store.dispatch(Intent::DiscardFromCart(ProductId::new(42))).unwrap();

    assert_eq!(store.cart(), &before);
}

#[tokio::test]
async fn page_view_serializes_for_the_renderer() {
    let store = loaded_storefront().await;
    let json = serde_json::to_value(store.page()).unwrap();

    assert_eq!(json["page"], "listing");
    assert_eq!(json["categories"][0], "all");
    assert_eq!(json["price_ranges"][2]["value"], "50to100");
    assert_eq!(json["products"][0]["price_label"], "$109.95");
}
