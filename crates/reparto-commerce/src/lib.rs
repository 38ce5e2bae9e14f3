//! Marketplace domain types for Reparto.
//!
//! This crate holds the client-side state and payload types shared by
//! every view of the delivery marketplace:
//!
//! - **Cart**: the in-memory shopping cart with merge-by-product semantics
//! - **Catalog**: product records served by a negocio
//! - **Checkout**: delivery address, order payload, order status
//! - **Approval**: pending negocio/repartidor registrations
//! - **Auth**: roles and login payloads
//!
//! # Example
//!
//! ```
//! use reparto_commerce::prelude::*;
//!
//! let mut cart = Cart::new(Currency::MXN);
//! let line = NewLine {
//!     product_id: ProductId::new(1),
//!     name: "Tacos".to_string(),
//!     description: String::new(),
//!     unit_price: Money::new(1000, Currency::MXN),
//!     category: None,
//!     stock_hint: None,
//!     image_ref: None,
//!     negocio_id: Some(NegocioId::new(3)),
//! };
//! cart.add_product(line.clone());
//! cart.add_product(line);
//!
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.total().display(), "$20.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod approval;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    pub use crate::approval::{ApprovalDecision, ApprovalKind, PendingNegocio, PendingRepartidor};
    pub use crate::auth::{Credentials, Role, Session};
    pub use crate::cart::{Cart, CartLine, CartNegocio, CartTotals, NewLine};
    pub use crate::catalog::Product;
    pub use crate::checkout::{
        AssignedOrder, DeliveryAddress, OrderItem, OrderReceipt, OrderRequest, OrderStatus,
    };
}
