//! Analytics events.
//!
//! Events are fire-and-forget: a sink can drop them, but it can never fail
//! the operation that produced them.

use crate::catalog::Product;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Event names understood by the analytics backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingEventKind {
    ViewItem,
    AddToCart,
}

impl TrackingEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackingEventKind::ViewItem => "view_item",
            TrackingEventKind::AddToCart => "add_to_cart",
        }
    }
}

/// A product entry inside an ecommerce payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackingItem {
    pub item_id: ProductId,
    pub item_name: String,
    pub index: u32,
    pub price: f64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EcommercePayload {
    pub currency: String,
    pub value: f64,
    pub items: Vec<TrackingItem>,
}

/// An analytics event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackingEvent {
    pub event: TrackingEventKind,
    pub ecommerce: EcommercePayload,
}

impl TrackingEvent {
    /// A product was opened.
    pub fn view_item(product: &Product) -> Self {
        Self::single(TrackingEventKind::ViewItem, product)
    }

    /// One unit of a product was put in the cart.
    pub fn add_to_cart(product: &Product) -> Self {
        Self::single(TrackingEventKind::AddToCart, product)
    }

    fn single(event: TrackingEventKind, product: &Product) -> Self {
        let price = product.price.to_decimal();
        Self {
            event,
            ecommerce: EcommercePayload {
                currency: product.price.currency.code().to_string(),
                value: price,
                items: vec![TrackingItem {
                    item_id: product.id,
                    item_name: product.name.clone(),
                    index: 0,
                    price,
                    quantity: 1,
                }],
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Receiver of analytics events.
pub trait TrackingSink: Send + Sync {
    fn dispatch(&self, event: &TrackingEvent);
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTrackingSink;

impl TrackingSink for NoopTrackingSink {
    fn dispatch(&self, _event: &TrackingEvent) {}
}

/// Sink that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingTrackingSink {
    events: Mutex<Vec<TrackingEvent>>,
}

impl RecordingTrackingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TrackingEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl TrackingSink for RecordingTrackingSink {
    fn dispatch(&self, event: &TrackingEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};
    use serde_json::json;

    #[test]
    fn test_add_to_cart_payload_shape() {
        let product = Product::new(1, "Test Product", Money::from_units(100, Currency::UAH), 1);
        let event = TrackingEvent::add_to_cart(&product);

        assert_eq!(
            event.to_json(),
            json!({
                "event": "add_to_cart",
                "ecommerce": {
                    "currency": "UAH",
                    "value": 100.0,
                    "items": [{
                        "item_id": 1,
                        "item_name": "Test Product",
                        "index": 0,
                        "price": 100.0,
                        "quantity": 1
                    }]
                }
            })
        );
    }

    #[test]
    fn test_recording_sink() {
        let sink = RecordingTrackingSink::new();
        let product = Product::new(2, "Шарф", Money::from_units(250, Currency::UAH), 1);
        sink.dispatch(&TrackingEvent::view_item(&product));

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, TrackingEventKind::ViewItem);
    }
}
