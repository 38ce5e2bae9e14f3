//! Client session for the Reparto marketplace.
//!
//! An [`AppSession`] owns the session's single [`CartStore`] and hands it,
//! together with the API client, to each view it builds. Views never look
//! the cart up on their own, so a view without a cart cannot be built.
//!
//! Admin and repartidor views keep their lists fresh with a [`Poller`].

pub mod error;
pub mod poll;
pub mod session;
pub mod sources;
pub mod store;
pub mod views;

#[cfg(test)]
mod testing;

pub use error::{AppError, CheckoutError};
pub use poll::{PollHandle, PollSource, Poller, Snapshot};
pub use session::{AppSession, DEFAULT_POLL_INTERVAL};
pub use store::{CartSnapshot, CartStore, CartSubscription};
pub use views::{ApprovalsView, CartView, CatalogView, CheckoutView, DeliveriesView};
