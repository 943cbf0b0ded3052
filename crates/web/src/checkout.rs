//! Mock checkout flow: which panel is open, and the delivery form submission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{Aggregate, DomainError, OrderRef, Price, ValueObject};

/// Which part of the checkout UI is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutState {
    #[default]
    Browsing,
    CartOpen,
    DeliveryFormOpen,
}

/// Delivery form contents. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeliveryDetails {
    pub name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

impl DeliveryDetails {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            city: city.into(),
            postal_code: postal_code.into(),
        }
    }

    /// Names of the fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("address", &self.address),
            ("city", &self.city),
            ("postal code", &self.postal_code),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(format!(
                "missing delivery details: {}",
                missing.join(", ")
            )))
        }
    }
}

impl ValueObject for DeliveryDetails {}

/// Outcome of a completed mock checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub order_ref: OrderRef,
    pub placed_at: DateTime<Utc>,
    pub total_items: u64,
    pub total_price: Price,
    pub delivery: DeliveryDetails,
}

impl Receipt {
    /// One-line confirmation shown to the user.
    pub fn summary(&self) -> String {
        format!(
            "Order placed! Total: {}. Delivering to {}, {}, {} {}.",
            self.total_price,
            self.delivery.name,
            self.delivery.address,
            self.delivery.city,
            self.delivery.postal_code
        )
    }
}

/// Command: SubmitDelivery.
///
/// Cart totals, reference and timestamp are captured by the caller so that
/// `handle` stays deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitDelivery {
    pub details: DeliveryDetails,
    pub order_ref: OrderRef,
    pub total_items: u64,
    pub total_price: Price,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutCommand {
    ToggleCart,
    BuyNow,
    CancelDelivery,
    SubmitDelivery(SubmitDelivery),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutEvent {
    CartOpened,
    CartClosed,
    DeliveryFormOpened,
    DeliveryCancelled,
    CheckoutCompleted(Receipt),
}

/// Presentation-driven checkout state machine.
///
/// `Browsing <-> CartOpen`, `Browsing | CartOpen -> DeliveryFormOpen`,
/// `DeliveryFormOpen -> Browsing` on submit or cancel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutFlow {
    state: CheckoutState,
    last_receipt: Option<Receipt>,
    version: u64,
}

impl CheckoutFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    pub fn is_cart_open(&self) -> bool {
        self.state == CheckoutState::CartOpen
    }

    pub fn is_delivery_form_open(&self) -> bool {
        self.state == CheckoutState::DeliveryFormOpen
    }

    /// Receipt of the most recent completed checkout, if any.
    pub fn last_receipt(&self) -> Option<&Receipt> {
        self.last_receipt.as_ref()
    }
}

impl Aggregate for CheckoutFlow {
    type Command = CheckoutCommand;
    type Event = CheckoutEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CheckoutEvent::CartOpened => {
                self.state = CheckoutState::CartOpen;
            }
            CheckoutEvent::CartClosed | CheckoutEvent::DeliveryCancelled => {
                self.state = CheckoutState::Browsing;
            }
            CheckoutEvent::DeliveryFormOpened => {
                self.state = CheckoutState::DeliveryFormOpen;
            }
            CheckoutEvent::CheckoutCompleted(receipt) => {
                self.state = CheckoutState::Browsing;
                self.last_receipt = Some(receipt.clone());
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CheckoutCommand::ToggleCart => Ok(self.handle_toggle_cart()),
            CheckoutCommand::BuyNow => Ok(self.handle_buy_now()),
            CheckoutCommand::CancelDelivery => Ok(self.handle_cancel()),
            CheckoutCommand::SubmitDelivery(cmd) => self.handle_submit(cmd),
        }
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl CheckoutFlow {
    fn handle_toggle_cart(&self) -> Vec<CheckoutEvent> {
        match self.state {
            CheckoutState::Browsing => vec![CheckoutEvent::CartOpened],
            CheckoutState::CartOpen => vec![CheckoutEvent::CartClosed],
            CheckoutState::DeliveryFormOpen => {
                vec![CheckoutEvent::DeliveryCancelled, CheckoutEvent::CartOpened]
            }
        }
    }

    fn handle_buy_now(&self) -> Vec<CheckoutEvent> {
        match self.state {
            CheckoutState::DeliveryFormOpen => vec![],
            CheckoutState::Browsing | CheckoutState::CartOpen => {
                vec![CheckoutEvent::DeliveryFormOpened]
            }
        }
    }

    fn handle_cancel(&self) -> Vec<CheckoutEvent> {
        match self.state {
            CheckoutState::DeliveryFormOpen => vec![CheckoutEvent::DeliveryCancelled],
            _ => vec![],
        }
    }

    fn handle_submit(&self, cmd: &SubmitDelivery) -> Result<Vec<CheckoutEvent>, DomainError> {
        if self.state != CheckoutState::DeliveryFormOpen {
            return Err(DomainError::invariant(
                "delivery details can only be submitted from the delivery form",
            ));
        }
        cmd.details.validate()?;

        Ok(vec![CheckoutEvent::CheckoutCompleted(Receipt {
            order_ref: cmd.order_ref,
            placed_at: cmd.occurred_at,
            total_items: cmd.total_items,
            total_price: cmd.total_price,
            delivery: cmd.details.clone(),
        })])
    }
}
