//! Storefront domain types and logic.
//!
//! This crate holds everything a shopper touches while browsing:
//!
//! - **Catalog**: Products and the catalog supplier trait
//! - **Cart**: Line items keyed by product and size, totals, listeners
//! - **Wish list**: Liked products in the order they were liked
//! - **Purchase**: The cart → order details → confirmed flow
//! - **Search**: Search-box suggestions, filters and sorting
//! - **Tracking**: Analytics events for product views and cart adds
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storefront_commerce::prelude::*;
//!
//! let catalog = Arc::new(InMemoryCatalog::from_json(&json)?);
//! let mut session = ShopSession::new(catalog);
//!
//! session.add_to_cart(ProductId::new(1), Size::new(38))?;
//! println!("Total: {}", session.cart().total());
//!
//! let mut flow = session.open_purchase();
//! session.advance_purchase(&mut flow, &submitter).await?;
//! flow.set_order_details(details);
//! session.advance_purchase(&mut flow, &submitter).await?;
//! println!("{}", flow.current_step_label());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod purchase;
pub mod search;
pub mod session;
pub mod tracking;
pub mod wishlist;

pub use error::{CommerceError, SubmissionError};
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CommerceError, SubmissionError};
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{InMemoryCatalog, Product, ProductCatalog};

    // Cart
    pub use crate::cart::{CartLineItem, CartStore, CartSummary, MAX_QUANTITY_PER_ITEM};

    // Wish list
    pub use crate::wishlist::WishListStore;

    // Purchase
    pub use crate::purchase::{
        LocalOrderSubmitter, OrderDetails, OrderReceipt, OrderSubmitter, PurchaseFlow,
        PurchaseStep,
    };

    // Search
    pub use crate::search::{
        filter_products_by_query, Filter, SearchQuery, SortOption, DEFAULT_SUGGESTION_LIMIT,
    };

    // Session and analytics
    pub use crate::session::{SessionState, ShopSession};
    pub use crate::tracking::{
        NoopTrackingSink, RecordingTrackingSink, TrackingEvent, TrackingEventKind, TrackingSink,
    };
}
