//! Observability for the storefront.
//!
//! This crate provides:
//! - `init` - Global `tracing` subscriber with env filter and human/JSON output
//! - `LogLevel` / `LogFormat` - Values accepted by the `[logging]` config section
//! - `LogTrackingSink` - Analytics events emitted as structured log records

mod logging;
mod tracking;

pub use logging::*;
pub use tracking::*;
