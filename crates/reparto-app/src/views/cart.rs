//! Cart display.

use crate::store::{CartSnapshot, CartStore, CartSubscription};
use reparto_commerce::ids::ProductId;

/// Read side of the cart plus the user-initiated removals.
pub struct CartView {
    cart: CartStore,
}

impl CartView {
    pub fn new(cart: CartStore) -> Self {
        Self { cart }
    }

    /// What to render right now.
    pub fn render(&self) -> CartSnapshot {
        self.cart.snapshot()
    }

    pub fn remove(&self, product_id: ProductId) -> bool {
        self.cart.remove_product(product_id)
    }

    pub fn clear(&self) {
        self.cart.clear();
    }

    /// Re-render trigger.
    pub fn subscribe(&self) -> CartSubscription {
        self.cart.subscribe()
    }
}
