//! The client-side cart and its lines.

use crate::cart::CartTotals;
use crate::ids::{NegocioId, ProductId};
use crate::money::{Currency, Money};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A product as offered to [`Cart::add_product`].
///
/// Usually built from a catalog record with
/// [`Product::to_cart_line`](crate::catalog::Product::to_cart_line).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewLine {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub unit_price: Money,
    pub category: Option<String>,
    pub stock_hint: Option<i64>,
    pub image_ref: Option<String>,
    pub negocio_id: Option<NegocioId>,
}

/// One distinct product in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub unit_price: Money,
    pub category: Option<String>,
    /// Stock reported when the line was created. Never enforced.
    pub stock_hint: Option<i64>,
    pub image_ref: Option<String>,
    /// Always at least 1.
    pub quantity: u32,
    pub negocio_id: Option<NegocioId>,
}

impl CartLine {
    fn from_new(line: NewLine) -> Self {
        Self {
            product_id: line.product_id,
            name: line.name,
            description: line.description,
            unit_price: line.unit_price,
            category: line.category,
            stock_hint: line.stock_hint,
            image_ref: line.image_ref,
            quantity: 1,
            negocio_id: line.negocio_id,
        }
    }

    /// `unit_price * quantity`.
    pub fn subtotal(&self) -> Money {
        self.unit_price.saturating_mul(i64::from(self.quantity))
    }
}

/// Which negocio the cart's lines belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartNegocio {
    /// No lines.
    Empty,
    /// Lines exist but none names a negocio.
    Unassigned,
    /// Every line that names a negocio names this one.
    Single(NegocioId),
    /// Lines from several negocios, in first-seen order.
    Mixed(Vec<NegocioId>),
}

/// An in-memory shopping cart.
///
/// Lines are keyed by product and kept in insertion order. Adding a
/// product that is already present bumps its quantity instead of creating
/// a second line; there is no way to hold a zero-quantity line.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    currency: Currency,
    lines: IndexMap<ProductId, CartLine>,
}

impl Cart {
    /// Create an empty cart priced in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            lines: IndexMap::new(),
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Add one unit of a product.
    ///
    /// If the product is already in the cart its quantity goes up by one
    /// and the descriptive fields of `line` are ignored. Otherwise the line
    /// is appended with quantity 1.
    pub fn add_product(&mut self, line: NewLine) {
        if line.unit_price.currency != self.currency {
            tracing::warn!(
                product_id = %line.product_id,
                expected = %self.currency,
                got = %line.unit_price.currency,
                "cart line priced in a different currency"
            );
        }

        match self.lines.get_mut(&line.product_id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(1);
                tracing::debug!(
                    product_id = %line.product_id,
                    quantity = existing.quantity,
                    "merged into existing cart line"
                );
            }
            None => {
                tracing::debug!(product_id = %line.product_id, "new cart line");
                self.lines.insert(line.product_id, CartLine::from_new(line));
            }
        }
    }

    /// Remove the whole line for `product_id`.
    ///
    /// Returns whether a line was removed. Absent ids are a no-op.
    pub fn remove_product(&mut self, product_id: ProductId) -> bool {
        self.lines.shift_remove(&product_id).is_some()
    }

    /// Take up to `quantity` units of `product_id` out of the cart, dropping
    /// the line once nothing is left.
    ///
    /// Returns whether anything changed.
    pub fn take_quantity(&mut self, product_id: ProductId, quantity: u32) -> bool {
        let Some(line) = self.lines.get_mut(&product_id) else {
            return false;
        };
        if quantity == 0 {
            return false;
        }
        if line.quantity > quantity {
            line.quantity -= quantity;
        } else {
            self.lines.shift_remove(&product_id);
        }
        true
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> impl ExactSizeIterator<Item = &CartLine> + '_ {
        self.lines.values()
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.get(&product_id)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.values().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of `unit_price * quantity` over all lines.
    pub fn net(&self) -> Money {
        self.lines
            .values()
            .fold(Money::zero(self.currency), |acc, l| acc.saturating_add(&l.subtotal()))
    }

    /// Amount payable. No surcharges are applied, so this equals [`net`](Self::net).
    pub fn total(&self) -> Money {
        self.totals().total
    }

    /// Net, surcharges and total in one snapshot.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from_net(self.net())
    }

    /// Describe which negocio the cart is bound to.
    pub fn negocio(&self) -> CartNegocio {
        if self.lines.is_empty() {
            return CartNegocio::Empty;
        }

        let mut seen: Vec<NegocioId> = Vec::new();
        for id in self.lines.values().filter_map(|l| l.negocio_id) {
            if !seen.contains(&id) {
                seen.push(id);
            }
        }

        match seen.len() {
            0 => CartNegocio::Unassigned,
            1 => CartNegocio::Single(seen[0]),
            _ => CartNegocio::Mixed(seen),
        }
    }
}
