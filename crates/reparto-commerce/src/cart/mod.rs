//! Shopping cart module.

#[allow(clippy::module_inception)]
mod cart;
mod totals;

pub use cart::{Cart, CartLine, CartNegocio, NewLine};
pub use totals::CartTotals;
