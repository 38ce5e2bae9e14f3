//! Checkout module: delivery address and order payloads.

mod address;
mod order;

pub use address::DeliveryAddress;
pub use order::{AssignedOrder, OrderItem, OrderReceipt, OrderRequest, OrderStatus};
