//! Newtype IDs for the marketplace entities.
//!
//! The backend keys every record with an integer, so unlike string slugs
//! these wrap an `i64`. Keeping them distinct stops a `NegocioId` from
//! being passed where a `ProductId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Macro to generate integer newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw backend identifier.
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// The raw identifier as sent over the wire.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

define_id!(
    /// A product in a negocio's catalog.
    ProductId
);
define_id!(
    /// A business (negocio) selling through the marketplace.
    NegocioId
);
define_id!(
    /// A courier (repartidor).
    RepartidorId
);
define_id!(
    /// An authenticated account of any role.
    UserId
);
define_id!(
    /// A submitted order (pedido).
    OrderId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrips_as_bare_integer() {
        let id = ProductId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");

        let parsed: NegocioId = serde_json::from_str("7").unwrap();
        assert_eq!(parsed.get(), 7);
    }

    #[test]
    fn test_id_from_str() {
        let id: OrderId = " 19 ".parse().unwrap();
        assert_eq!(id, OrderId::new(19));
        assert!("abc".parse::<OrderId>().is_err());
    }

    #[test]
    fn test_id_display() {
        assert_eq!(RepartidorId::new(3).to_string(), "3");
    }
}
