//! Type-safe key-value storage for the storefront.
//!
//! Keeps the shopper's cart and wish list across reloads and files order
//! receipts. Values are JSON; backends are in-memory or one file per key.
//!
//! # Example
//!
//! ```
//! use storefront_cache::Cache;
//!
//! let cache = Cache::in_memory();
//! cache.set("order:1", &vec![1, 2, 3]).unwrap();
//! let lines: Option<Vec<i32>> = cache.get("order:1").unwrap();
//! assert_eq!(lines, Some(vec![1, 2, 3]));
//! ```

mod error;
mod kv;
mod session;

pub use error::CacheError;
pub use kv::{Cache, FileBackend, KvBackend, MemoryBackend};
pub use session::{Session, SessionData, SessionId};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, Session, SessionId};
}
