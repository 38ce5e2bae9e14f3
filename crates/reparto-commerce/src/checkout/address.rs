//! Delivery address.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-form delivery address as typed by the client.
///
/// The backend stores it as a single line, so there is no structure to
/// validate beyond it not being blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeliveryAddress(String);

impl DeliveryAddress {
    /// Trim and validate an address.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, CommerceError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CommerceError::MissingAddress);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeliveryAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let addr = DeliveryAddress::parse("  Av. Juárez 12, Centro \n").unwrap();
        assert_eq!(addr.as_str(), "Av. Juárez 12, Centro");
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert_eq!(DeliveryAddress::parse("   "), Err(CommerceError::MissingAddress));
    }
}
