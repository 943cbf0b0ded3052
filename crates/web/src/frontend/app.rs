//! Leptos components: listing with filters, cart panel, delivery form.

use std::str::FromStr;

use leptos::*;

use storefront_catalog::{CategoryFilter, HttpCatalogSource, PriceRange};

use crate::checkout::DeliveryDetails;
use crate::config::StorefrontConfig;
use crate::frontend::handle::{StoreHandle, use_store};
use crate::state::{Intent, Storefront};
use crate::view::{PageView, ProductCard};

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    let config = StorefrontConfig::from_env().unwrap_or_default();
    let store = StoreHandle::new(
        Storefront::with_config(&config),
        HttpCatalogSource::new(config.catalog_url.clone()),
    );
    provide_context(store);

    // One-shot: later dispatches of LoadCatalog are no-ops in the store.
    store.dispatch(Intent::LoadCatalog);

    view! {
        <div class="app">
            <header>
                <h1>"Product List with Filters"</h1>
                <CartButton/>
            </header>
            <main>
                <ReceiptBanner/>
                <ProductListPage/>
                <CartPanel/>
                <DeliveryForm/>
            </main>
        </div>
    }
}

#[component]
fn CartButton() -> impl IntoView {
    let store = use_store();
    let count = move || store.state.with(|s| s.cart().total_items());

    view! {
        <button class="cart-toggle" on:click=move |_| store.dispatch(Intent::ToggleCart)>
            "Cart (" {count} ")"
        </button>
    }
}

#[component]
fn ProductListPage() -> impl IntoView {
    let store = use_store();

    move || match store.state.with(|s| s.page()) {
        PageView::Loading => view! { <div>"Loading..."</div> }.into_view(),
        PageView::Error { message } => view! { <div>"Error: " {message}</div> }.into_view(),
        PageView::Listing(listing) => {
            let selected_category = listing.selection.category.to_string();
            let selected_range = listing.selection.price_range;

            view! {
                <div class="filters">
                    <label for="category">"Choose a category:"</label>
                    <select
                        id="category"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            store.dispatch(Intent::SelectCategory(CategoryFilter::from(value)));
                        }
                    >
                        {listing
                            .categories
                            .into_iter()
                            .map(|category| {
                                let value = category.to_string();
                                let selected = value == selected_category;
                                view! { <option value=value.clone() selected=selected>{value}</option> }
                            })
                            .collect_view()}
                    </select>

                    <label for="price">"Choose a price range:"</label>
                    <select
                        id="price"
                        on:change=move |ev| {
                            let range = PriceRange::from_str(&event_target_value(&ev)).unwrap_or_default();
                            store.dispatch(Intent::SelectPriceRange(range));
                        }
                    >
                        {listing
                            .price_ranges
                            .into_iter()
                            .map(|option| {
                                let selected = option.value == selected_range;
                                view! {
                                    <option value=option.value.as_str() selected=selected>
                                        {option.label}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>

                <div class="product-grid">
                    {listing
                        .products
                        .into_iter()
                        .map(|card| view! { <ProductTile card=card/> })
                        .collect_view()}
                </div>
            }
            .into_view()
        }
    }
}

#[component]
fn ProductTile(card: ProductCard) -> impl IntoView {
    let store = use_store();
    let id = card.id;
    let alt = card.title.clone();

    let add = move |_| {
        if let Some(product) = store.product(id) {
            store.dispatch(Intent::AddToCart(product));
        }
    };

    view! {
        <div class="card">
            <img src=card.image alt=alt/>
            <h2>{card.title}</h2>
            <p>{card.description_preview}</p>
            <div class="price">{card.price_label}</div>
            <button on:click=add>"Add to Cart"</button>
            <button on:click=move |_| store.dispatch(Intent::BuyNow)>"Buy Now"</button>
        </div>
    }
}

#[component]
fn CartPanel() -> impl IntoView {
    let store = use_store();
    let open = move || store.state.with(|s| s.checkout().is_cart_open());

    view! {
        <Show when=open>
            <aside class="cart">
                <h2>"Your Cart"</h2>
                {move || {
                    let summary = store.state.with(|s| s.cart_view());
                    match summary.empty_message {
                        Some(message) => view! { <p>{message}</p> }.into_view(),
                        None => view! {
                            <ul>
                                {summary
                                    .lines
                                    .into_iter()
                                    .map(|line| {
                                        let id = line.product_id;
                                        let add = move |_| {
                                            if let Some(product) = store.product(id) {
                                                store.dispatch(Intent::AddToCart(product));
                                            }
                                        };
                                        view! {
                                            <li>
                                                <span>{line.title}</span>
                                                <span>{line.unit_price_label} " x " {line.quantity}</span>
                                                <span>{line.line_total_label}</span>
                                                <button on:click=move |_| store.dispatch(Intent::RemoveFromCart(id))>"-"</button>
                                                <button on:click=add>"+"</button>
                                                <button on:click=move |_| store.dispatch(Intent::DiscardFromCart(id))>"Remove"</button>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                            <p>"Total items: " {summary.total_items}</p>
                            <p>"Total price: " {summary.total_price_label}</p>
                            <button on:click=move |_| store.dispatch(Intent::BuyNow)>"Buy Now"</button>
                        }
                        .into_view(),
                    }
                }}
            </aside>
        </Show>
    }
}

#[component]
fn DeliveryForm() -> impl IntoView {
    let store = use_store();
    let open = move || store.state.with(|s| s.checkout().is_delivery_form_open());

    let name = create_rw_signal(String::new());
    let address = create_rw_signal(String::new());
    let city = create_rw_signal(String::new());
    let postal_code = create_rw_signal(String::new());

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let details = DeliveryDetails::new(name.get(), address.get(), city.get(), postal_code.get());
        store.dispatch(Intent::SubmitDelivery(details));
    };

    view! {
        <Show when=open>
            <form class="delivery" on:submit=submit>
                <h2>"Delivery Details"</h2>
                <Field label="Name" value=name/>
                <Field label="Address" value=address/>
                <Field label="City" value=city/>
                <Field label="Postal Code" value=postal_code/>
                <div class="form-actions">
                    <button type="submit">"Place Order"</button>
                    <button type="button" on:click=move |_| store.dispatch(Intent::CancelDelivery)>
                        "Cancel"
                    </button>
                </div>
            </form>
        </Show>
    }
}

#[component]
fn Field(label: &'static str, value: RwSignal<String>) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>
                {label}
                <input
                    type="text"
                    required=true
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                />
            </label>
        </div>
    }
}

#[component]
fn ReceiptBanner() -> impl IntoView {
    let store = use_store();

    move || {
        store
            .state
            .with(|s| s.checkout().last_receipt().map(|r| r.summary()))
            .map(|summary| view! { <div class="receipt">{summary}</div> })
    }
}
