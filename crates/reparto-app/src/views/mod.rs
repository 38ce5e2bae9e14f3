//! View-models: the state and actions behind each screen.

mod approvals;
mod cart;
mod catalog;
mod checkout;
mod deliveries;

pub use approvals::ApprovalsView;
pub use cart::CartView;
pub use catalog::CatalogView;
pub use checkout::CheckoutView;
pub use deliveries::DeliveriesView;
