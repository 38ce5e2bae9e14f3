//! Derived cart amounts.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Amounts derived from the cart at a point in time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Sum of line subtotals.
    pub net: Money,
    /// Delivery fees, taxes and the like. Currently always zero.
    pub surcharges: Money,
    /// `net + surcharges`.
    pub total: Money,
}

impl CartTotals {
    pub(crate) fn from_net(net: Money) -> Self {
        let surcharges = Money::zero(net.currency);
        Self {
            net,
            surcharges,
            total: net.saturating_add(&surcharges),
        }
    }
}
