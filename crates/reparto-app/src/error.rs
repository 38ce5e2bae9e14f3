//! View-level error types.

use reparto_commerce::checkout::OrderStatus;
use reparto_commerce::error::CommerceError;
use reparto_commerce::ids::{OrderId, ProductId};
use reparto_data::FetchError;
use thiserror::Error;

/// Errors surfaced by the views to whatever renders them.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The product is not in the loaded catalog.
    #[error("Product {0} is not in the catalog")]
    UnknownProduct(ProductId),

    /// The order is not among the assigned orders.
    #[error("Order {0} is not assigned to you")]
    UnknownOrder(OrderId),

    #[error("Order cannot go from {} to {}", from.as_str(), to.as_str())]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
}

/// Why a checkout did not go through. The cart is untouched in every case.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// The cart cannot be turned into an order as it stands.
    #[error("Cannot place order: {0}")]
    Invalid(#[from] CommerceError),

    /// The backend refused the order or could not be reached.
    #[error("Order submission failed: {0}")]
    Rejected(#[from] FetchError),
}
