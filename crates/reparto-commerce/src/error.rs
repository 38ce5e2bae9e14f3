//! Domain error types.

use crate::ids::NegocioId;
use thiserror::Error;

/// Errors raised while turning client-side state into API payloads.
///
/// Cart mutations themselves never fail; these only appear at the
/// checkout boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The cart holds products from more than one negocio.
    #[error("Cart mixes products from several negocios: {0:?}")]
    MixedNegocios(Vec<NegocioId>),

    /// No line carries a negocio and none was supplied.
    #[error("Cart is not bound to a negocio")]
    MissingNegocio,

    /// Delivery address is blank.
    #[error("Delivery address is required")]
    MissingAddress,

    /// A catalog price is negative or not a finite number.
    #[error("Invalid price for product {product}: {price}")]
    InvalidPrice { product: String, price: f64 },

    /// Arithmetic overflow while totalling.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Text that names no order status.
    #[error("Unknown order status '{0}'")]
    UnknownStatus(String),
}
