//! The session-wide cart handle.
//!
//! One [`CartStore`] exists per running session. Every view that reads or
//! mutates the cart is handed a clone at construction time; clones share
//! the same cart. Mutations bump a revision counter that subscribers can
//! await to know when to re-render.

use reparto_commerce::cart::{Cart, CartLine, CartNegocio, CartTotals, NewLine};
use reparto_commerce::catalog::Product;
use reparto_commerce::error::CommerceError;
use reparto_commerce::ids::ProductId;
use reparto_commerce::money::{Currency, Money};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::watch;

/// Shared handle to the session's cart.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<Inner>,
}

struct Inner {
    cart: RwLock<Cart>,
    revision: watch::Sender<u64>,
}

/// Point-in-time copy of the cart for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
    pub item_count: u64,
    pub revision: u64,
}

impl CartStore {
    pub fn new(currency: Currency) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                cart: RwLock::new(Cart::new(currency)),
                revision,
            }),
        }
    }

    pub fn currency(&self) -> Currency {
        self.read().currency()
    }

    /// Add one unit of a product, merging with an existing line.
    pub fn add_product(&self, line: NewLine) {
        self.mutate(|cart| cart.add_product(line));
    }

    /// Add one unit of a catalog product.
    pub fn add_catalog_product(&self, product: &Product) -> Result<(), CommerceError> {
        let line = product.to_cart_line(self.currency())?;
        self.add_product(line);
        Ok(())
    }

    /// Remove the whole line for `product_id`. No-op when absent.
    pub fn remove_product(&self, product_id: ProductId) -> bool {
        let mut cart = self.write();
        let removed = cart.remove_product(product_id);
        if removed {
            self.notify();
        }
        removed
    }

    pub fn clear(&self) {
        self.mutate(Cart::clear);
    }

    /// Run `f` against the current cart.
    ///
    /// The lock is held for the duration of `f`; do not await inside it.
    pub fn read_with<R>(&self, f: impl FnOnce(&Cart) -> R) -> R {
        f(&self.read())
    }

    /// Like [`read_with`](Self::read_with), also returning the revision
    /// the closure saw.
    pub fn read_with_revision<R>(&self, f: impl FnOnce(&Cart) -> R) -> (R, u64) {
        let cart = self.read();
        // Revisions only change under the write lock.
        let revision = *self.inner.revision.borrow();
        (f(&cart), revision)
    }

    /// Take the units of an accepted order out of the cart.
    ///
    /// `revision` is the revision the order was built from. If nothing
    /// changed since, the cart is cleared; otherwise only the ordered
    /// quantities are removed and later additions stay.
    pub fn settle_order(&self, revision: u64, ordered: &[(ProductId, u32)]) {
        let mut cart = self.write();
        let changed = if *self.inner.revision.borrow() == revision {
            let had_lines = !cart.is_empty();
            cart.clear();
            had_lines
        } else {
            tracing::debug!(revision, "cart changed during checkout; removing ordered units only");
            ordered
                .iter()
                .fold(false, |changed, (id, qty)| cart.take_quantity(*id, *qty) || changed)
        };
        if changed {
            self.notify();
        }
    }

    pub fn snapshot(&self) -> CartSnapshot {
        let cart = self.read();
        CartSnapshot {
            lines: cart.lines().cloned().collect(),
            totals: cart.totals(),
            item_count: cart.item_count(),
            revision: *self.inner.revision.borrow(),
        }
    }

    pub fn net(&self) -> Money {
        self.read().net()
    }

    pub fn total(&self) -> Money {
        self.read().total()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn negocio(&self) -> CartNegocio {
        self.read().negocio()
    }

    /// Number of mutations applied so far.
    pub fn revision(&self) -> u64 {
        *self.inner.revision.borrow()
    }

    /// Receive a notification after every mutation.
    pub fn subscribe(&self) -> CartSubscription {
        CartSubscription {
            rx: self.inner.revision.subscribe(),
        }
    }

    fn mutate(&self, f: impl FnOnce(&mut Cart)) {
        let mut cart = self.write();
        f(&mut cart);
        self.notify();
    }

    // Called with the write lock held so snapshots see matching revisions.
    fn notify(&self) {
        self.inner.revision.send_modify(|rev| *rev += 1);
    }

    // Cart operations cannot panic halfway through, so a poisoned lock
    // still guards a consistent cart.
    fn read(&self) -> RwLockReadGuard<'_, Cart> {
        self.inner.cart.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Cart> {
        self.inner.cart.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Change notifications for a [`CartStore`].
pub struct CartSubscription {
    rx: watch::Receiver<u64>,
}

impl CartSubscription {
    /// Wait for the next mutation. Returns the new revision, or `None`
    /// once every handle to the store is gone.
    pub async fn changed(&mut self) -> Option<u64> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}
