//! Analytics events as log records.

use storefront_commerce::tracking::{TrackingEvent, TrackingSink};

/// Target that analytics records are emitted on.
pub const TRACKING_TARGET: &str = "storefront::tracking";

/// [`TrackingSink`] that writes every event as an `info` record.
///
/// The record carries the event name and the full JSON payload, so a log
/// shipper can forward it to the analytics backend unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrackingSink;

impl LogTrackingSink {
    pub fn new() -> Self {
        Self
    }
}

impl TrackingSink for LogTrackingSink {
    fn dispatch(&self, event: &TrackingEvent) {
        tracing::info!(
            target: TRACKING_TARGET,
            event = event.event.as_str(),
            payload = %event.to_json(),
            "tracking event"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use storefront_commerce::catalog::Product;
    use storefront_commerce::money::{Currency, Money};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_dispatch_emits_json_record() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_target(true)
            .with_writer(move || writer.clone())
            .finish();

        let product = Product::new(7, "Сумка", Money::from_units(890, Currency::UAH), 4);
        tracing::subscriber::with_default(subscriber, || {
            LogTrackingSink::new().dispatch(&TrackingEvent::add_to_cart(&product));
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        let record: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(record["target"], TRACKING_TARGET);
        assert_eq!(record["fields"]["event"], "add_to_cart");

        let payload: serde_json::Value =
            serde_json::from_str(record["fields"]["payload"].as_str().unwrap()).unwrap();
        assert_eq!(payload["ecommerce"]["items"][0]["item_id"], 7);
        assert_eq!(payload["ecommerce"]["value"], 890.0);
    }
}
