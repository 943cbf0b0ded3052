//! The `Storefront` as seen by components: a signal plus the catalog source,
//! provided through Leptos context.

use leptos::*;

use storefront_catalog::{CatalogSource, HttpCatalogSource, Product};
use storefront_core::ProductId;

use crate::state::{Effect, Intent, Storefront};

#[derive(Clone, Copy)]
pub struct StoreHandle {
    pub state: RwSignal<Storefront>,
    source: StoredValue<HttpCatalogSource>,
}

impl StoreHandle {
    pub fn new(store: Storefront, source: HttpCatalogSource) -> Self {
        Self {
            state: create_rw_signal(store),
            source: store_value(source),
        }
    }

    /// Reduce an intent and run whatever effects it asked for.
    pub fn dispatch(self, intent: Intent) {
        let Some(result) = self.state.try_update(|store| store.dispatch(intent)) else {
            return;
        };
        match result {
            Ok(dispatched) => {
                for effect in dispatched.effects {
                    self.run(effect);
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "intent rejected");
                alert(&err.to_string());
            }
        }
    }

    /// Catalog product by id, read without subscribing.
    pub fn product(self, id: ProductId) -> Option<Product> {
        self.state
            .with_untracked(|store| store.catalog().products().iter().find(|p| p.id == id).cloned())
    }

    fn run(self, effect: Effect) {
        match effect {
            Effect::FetchCatalog => {
                let source = self.source.get_value();
                spawn_local(async move {
                    let outcome = source.fetch_products().await;
                    self.dispatch(Intent::CatalogLoaded(outcome));
                });
            }
        }
    }
}

pub fn use_store() -> StoreHandle {
    expect_context::<StoreHandle>()
}

fn alert(message: &str) {
    if let Some(w) = web_sys::window() {
        if let Err(err) = w.alert_with_message(message) {
            tracing::debug!(error = ?err, "window.alert failed");
        }
    }
}
