use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use storefront_catalog::Product;
use storefront_core::{Aggregate, Entity, Price, ProductId};

/// Cart line: one product and how many of it.
///
/// Title and price are copied from the product at first add so the cart can be
/// rendered without the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub title: String,
    pub price: Price,
    /// Always >= 1 while the item is in the cart.
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

impl Entity for CartItem {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.product_id
    }
}

/// The user's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
    version: u64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items in first-add order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn item(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all items.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of price x quantity across all items.
    pub fn total_price(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn add_to_cart(&mut self, product: &Product) -> Vec<CartEvent> {
        self.run(CartCommand::AddToCart(AddToCart::from(product)))
    }

    pub fn remove_from_cart(&mut self, product_id: ProductId) -> Vec<CartEvent> {
        self.run(CartCommand::RemoveFromCart(RemoveFromCart { product_id }))
    }

    pub fn discard_item(&mut self, product_id: ProductId) -> Vec<CartEvent> {
        self.run(CartCommand::DiscardItem(DiscardItem { product_id }))
    }

    fn run(&mut self, command: CartCommand) -> Vec<CartEvent> {
        match self.execute(&command) {
            Ok(events) => events,
            Err(never) => match never {},
        }
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.items.iter().position(|i| i.product_id == product_id)
    }
}

/// Command: AddToCart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToCart {
    pub product_id: ProductId,
    pub title: String,
    pub price: Price,
}

impl From<&Product> for AddToCart {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id,
            title: product.title.clone(),
            price: product.price,
        }
    }
}

/// Command: RemoveFromCart (one unit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveFromCart {
    pub product_id: ProductId,
}

/// Command: DiscardItem (the whole line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardItem {
    pub product_id: ProductId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartCommand {
    AddToCart(AddToCart),
    RemoveFromCart(RemoveFromCart),
    DiscardItem(DiscardItem),
}

/// Event: ItemAdded (first unit of a product).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub product_id: ProductId,
    pub title: String,
    pub price: Price,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    ItemAdded(ItemAdded),
    QuantityIncreased { product_id: ProductId },
    QuantityDecreased { product_id: ProductId },
    ItemRemoved { product_id: ProductId },
}

impl Aggregate for Cart {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = Infallible;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::ItemAdded(e) => {
                self.items.push(CartItem {
                    product_id: e.product_id,
                    title: e.title.clone(),
                    price: e.price,
                    quantity: 1,
                });
            }
            CartEvent::QuantityIncreased { product_id } => {
                if let Some(idx) = self.position(*product_id) {
                    let item = &mut self.items[idx];
                    item.quantity = item.quantity.saturating_add(1);
                }
            }
            CartEvent::QuantityDecreased { product_id } => {
                if let Some(idx) = self.position(*product_id) {
                    let item = &mut self.items[idx];
                    item.quantity = item.quantity.saturating_sub(1);
                    // Never leave a zero-quantity line behind.
                    if item.quantity == 0 {
                        self.items.remove(idx);
                    }
                }
            }
            CartEvent::ItemRemoved { product_id } => {
                self.items.retain(|i| i.product_id != *product_id);
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::AddToCart(cmd) => Ok(self.handle_add(cmd)),
            CartCommand::RemoveFromCart(cmd) => Ok(self.handle_remove(cmd)),
            CartCommand::DiscardItem(cmd) => Ok(self.handle_discard(cmd)),
        }
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Cart {
    fn handle_add(&self, cmd: &AddToCart) -> Vec<CartEvent> {
        match self.item(cmd.product_id) {
            None => vec![CartEvent::ItemAdded(ItemAdded {
                product_id: cmd.product_id,
                title: cmd.title.clone(),
                price: cmd.price,
            })],
            Some(item) if item.quantity == u32::MAX => vec![],
            Some(_) => vec![CartEvent::QuantityIncreased {
                product_id: cmd.product_id,
            }],
        }
    }

    fn handle_remove(&self, cmd: &RemoveFromCart) -> Vec<CartEvent> {
        match self.item(cmd.product_id) {
            None => vec![],
            Some(item) if item.quantity <= 1 => vec![CartEvent::ItemRemoved {
                product_id: cmd.product_id,
            }],
            Some(_) => vec![CartEvent::QuantityDecreased {
                product_id: cmd.product_id,
            }],
        }
    }

    fn handle_discard(&self, cmd: &DiscardItem) -> Vec<CartEvent> {
        match self.item(cmd.product_id) {
            None => vec![],
            Some(_) => vec![CartEvent::ItemRemoved {
                product_id: cmd.product_id,
            }],
        }
    }
}
