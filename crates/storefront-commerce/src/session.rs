//! The shopper's browsing session.
//!
//! A `ShopSession` is created when the shop opens and owns the cart and wish
//! list for as long as the shopper browses. Collaborators (catalog, analytics,
//! storage) are handed in explicitly.

use crate::cart::{CartLineItem, CartStore, CartSummary};
use crate::catalog::{Product, ProductCatalog};
use crate::error::CommerceError;
use crate::ids::{ProductId, Size};
use crate::money::Currency;
use crate::purchase::{OrderSubmitter, PurchaseFlow, PurchaseStep};
use crate::search::filter_products_by_query;
use crate::tracking::{NoopTrackingSink, TrackingEvent, TrackingSink};
use crate::wishlist::WishListStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storefront_cache::{Cache, Session, SessionId};
use tracing::{debug, warn};

/// What is written through to storage after every change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionState {
    #[serde(default)]
    pub cart: Vec<CartLineItem>,
    #[serde(default)]
    pub wishlist: Vec<ProductId>,
}

pub struct ShopSession {
    id: SessionId,
    catalog: Arc<dyn ProductCatalog>,
    cart: CartStore,
    wishlist: WishListStore,
    tracking: Arc<dyn TrackingSink>,
    storage: Option<Session<SessionState>>,
}

impl ShopSession {
    /// A fresh in-memory session with analytics switched off.
    pub fn new(catalog: Arc<dyn ProductCatalog>) -> Self {
        Self {
            id: SessionId::generate(),
            catalog,
            cart: CartStore::new(),
            wishlist: WishListStore::new(),
            tracking: Arc::new(NoopTrackingSink),
            storage: None,
        }
    }

    /// Currency the cart totals are kept in. Existing lines are kept.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        let lines = self.cart.snapshot();
        self.cart = CartStore::with_currency(currency);
        self.cart.restore(lines);
        self
    }

    pub fn with_tracking(mut self, sink: Arc<dyn TrackingSink>) -> Self {
        self.tracking = sink;
        self
    }

    /// Attach write-through storage and restore whatever `id` saved last.
    pub fn with_storage(mut self, id: SessionId, cache: Cache) -> Result<Self, CommerceError> {
        let storage = Session::<SessionState>::new(cache);
        if let Some(state) = storage.get(&id)? {
            debug!(session = %id, lines = state.cart.len(), liked = state.wishlist.len(), "restored session");
            self.cart.restore(state.cart);
            self.wishlist.restore(state.wishlist);
        }
        self.id = id;
        self.storage = Some(storage);
        Ok(self)
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn catalog(&self) -> &dyn ProductCatalog {
        self.catalog.as_ref()
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn wishlist(&self) -> &WishListStore {
        &self.wishlist
    }

    /// Register a cart-total listener.
    pub fn on_cart_change<F>(&mut self, listener: F)
    where
        F: Fn(&CartSummary) + Send + 'static,
    {
        self.cart.subscribe(listener);
    }

    /// Open a product page.
    pub fn view_product(&self, product_id: ProductId) -> Result<&Product, CommerceError> {
        let product = self
            .catalog
            .find(product_id)
            .ok_or(CommerceError::ProductNotFound(product_id))?;
        self.tracking.dispatch(&TrackingEvent::view_item(product));
        Ok(product)
    }

    /// Put one unit of a product in the cart. Returns the line quantity.
    ///
    /// A line already at the quantity cap is left alone and nothing is tracked.
    pub fn add_to_cart(&mut self, product_id: ProductId, size: Size) -> Result<u32, CommerceError> {
        let catalog = Arc::clone(&self.catalog);
        let product = catalog
            .find(product_id)
            .ok_or(CommerceError::ProductNotFound(product_id))?;
        if !product.is_available() {
            return Err(CommerceError::OutOfStock(product_id));
        }

        let before = self.cart.find_item(product_id, size).map(|line| line.quantity);
        let quantity = self.cart.add_item(product, size)?;
        if before == Some(quantity) {
            return Ok(quantity);
        }
        self.tracking.dispatch(&TrackingEvent::add_to_cart(product));
        self.persist();
        Ok(quantity)
    }

    pub fn remove_from_cart(&mut self, product_id: ProductId, size: Size) -> bool {
        let changed = self.cart.remove_item(product_id, size);
        self.persist_if(changed)
    }

    pub fn increment(&mut self, product_id: ProductId, size: Size) -> bool {
        let changed = self.cart.increment_quantity(product_id, size);
        self.persist_if(changed)
    }

    pub fn decrement(&mut self, product_id: ProductId, size: Size) -> bool {
        let changed = self.cart.decrement_quantity(product_id, size);
        self.persist_if(changed)
    }

    pub fn clear_cart(&mut self) {
        let changed = !self.cart.is_empty();
        self.cart.clear();
        self.persist_if(changed);
    }

    /// Like a product. Returns whether it was newly liked.
    pub fn like(&mut self, product_id: ProductId) -> Result<bool, CommerceError> {
        let catalog = Arc::clone(&self.catalog);
        let product = catalog
            .find(product_id)
            .ok_or(CommerceError::ProductNotFound(product_id))?;
        let added = self.wishlist.add_item(product);
        Ok(self.persist_if(added))
    }

    pub fn unlike(&mut self, product_id: ProductId) -> bool {
        let removed = self.wishlist.remove_item(product_id);
        self.persist_if(removed)
    }

    /// Returns whether the product is liked afterwards.
    pub fn toggle_like(&mut self, product_id: ProductId) -> Result<bool, CommerceError> {
        let catalog = Arc::clone(&self.catalog);
        let product = catalog
            .find(product_id)
            .ok_or(CommerceError::ProductNotFound(product_id))?;
        let liked = self.wishlist.toggle(product);
        self.persist();
        Ok(liked)
    }

    pub fn is_liked(&self, product_id: ProductId) -> bool {
        self.wishlist.contains(product_id)
    }

    /// Liked products still present in the catalog, oldest like first.
    pub fn wishlist_products(&self) -> Vec<&Product> {
        self.wishlist
            .iter()
            .filter_map(|id| self.catalog.find(id))
            .collect()
    }

    /// Search-box suggestions.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Product> {
        let mut results = filter_products_by_query(self.catalog.list(), query);
        results.truncate(limit);
        results
    }

    /// Open the purchase panel.
    pub fn open_purchase(&self) -> PurchaseFlow {
        PurchaseFlow::new()
    }

    /// Advance `flow` against this session's cart.
    pub async fn advance_purchase<S>(
        &mut self,
        flow: &mut PurchaseFlow,
        submitter: &S,
    ) -> Result<PurchaseStep, CommerceError>
    where
        S: OrderSubmitter + ?Sized,
    {
        let step = flow.advance(&mut self.cart, submitter).await?;
        if step == PurchaseStep::Confirmed {
            self.persist();
        }
        Ok(step)
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            cart: self.cart.snapshot(),
            wishlist: self.wishlist.get_all(),
        }
    }

    fn persist_if(&self, changed: bool) -> bool {
        if changed {
            self.persist();
        }
        changed
    }

    /// Write the session through to storage. Failures are logged, never raised.
    fn persist(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(e) = storage.set(&self.id, &self.state()) {
            warn!(session = %self.id, error = %e, "failed to save session");
        }
    }
}

impl std::fmt::Debug for ShopSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopSession")
            .field("id", &self.id)
            .field("cart", &self.cart)
            .field("wishlist", &self.wishlist)
            .field("persistent", &self.storage.is_some())
            .finish_non_exhaustive()
    }
}
