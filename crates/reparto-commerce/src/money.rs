//! Money type for prices and order totals.
//!
//! The API speaks decimal numbers (`"precio": 10.5`), but every amount is
//! held here in the currency's minor unit so cart arithmetic is exact.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Currencies the marketplace can be configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    MXN,
    USD,
    EUR,
    COP,
    ARS,
    PEN,
    CLP,
}

impl Currency {
    /// ISO code, e.g. "MXN".
    pub fn code(&self) -> &'static str {
        match self {
            Currency::MXN => "MXN",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::COP => "COP",
            Currency::ARS => "ARS",
            Currency::PEN => "PEN",
            Currency::CLP => "CLP",
        }
    }

    /// Display symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::MXN | Currency::USD | Currency::COP | Currency::ARS | Currency::CLP => "$",
            Currency::EUR => "\u{20ac}",
            Currency::PEN => "S/",
        }
    }

    /// Number of decimal places in the minor unit.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::CLP => 0,
            _ => 2,
        }
    }

    /// Parse a currency code, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "MXN" => Some(Currency::MXN),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "COP" => Some(Currency::COP),
            "ARS" => Some(Currency::ARS),
            "PEN" => Some(Currency::PEN),
            "CLP" => Some(Currency::CLP),
            _ => None,
        }
    }

    fn scale(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A monetary amount in minor units of a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit (centavos for MXN).
    pub minor: i64,
    pub currency: Currency,
}

impl Money {
    pub const fn new(minor: i64, currency: Currency) -> Self {
        Self { minor, currency }
    }

    pub const fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Build from a decimal amount as the API sends it.
    ///
    /// ```
    /// use reparto_commerce::money::{Currency, Money};
    /// let price = Money::from_decimal(49.99, Currency::MXN);
    /// assert_eq!(price.minor, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let minor = (amount * currency.scale() as f64).round() as i64;
        Self::new(minor, currency)
    }

    /// Decimal value for the wire.
    pub fn to_decimal(&self) -> f64 {
        self.minor as f64 / self.currency.scale() as f64
    }

    pub fn is_zero(&self) -> bool {
        self.minor == 0
    }

    /// Add another amount; `None` on currency mismatch or overflow.
    pub fn checked_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.minor
            .checked_add(other.minor)
            .map(|minor| Money::new(minor, self.currency))
    }

    /// Multiply by a quantity; `None` on overflow.
    pub fn checked_mul(&self, factor: i64) -> Option<Money> {
        self.minor
            .checked_mul(factor)
            .map(|minor| Money::new(minor, self.currency))
    }

    /// Multiply by a quantity, clamping at the numeric bounds.
    pub fn saturating_mul(&self, factor: i64) -> Money {
        Money::new(self.minor.saturating_mul(factor), self.currency)
    }

    /// Add an amount of the same currency, clamping at the numeric bounds.
    ///
    /// The other amount is taken at face value in `self`'s currency.
    pub fn saturating_add(&self, other: &Money) -> Money {
        Money::new(self.minor.saturating_add(other.minor), self.currency)
    }

    /// Format for display, e.g. "$49.99".
    pub fn display(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{}{:.places$}", self.currency.symbol(), self.to_decimal())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Serialize an amount as a bare decimal number (`25.5`).
pub fn serialize_decimal<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(money.to_decimal())
}

/// Deserialize a decimal that may arrive as a number or a numeric string.
///
/// Backends built on SQL `DECIMAL` columns commonly emit `"10.50"`.
pub fn deserialize_decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid decimal: {s:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(Money::from_decimal(10.0, Currency::MXN).minor, 1000);
        assert_eq!(Money::from_decimal(0.1 + 0.2, Currency::MXN).minor, 30);
        assert_eq!(Money::from_decimal(1500.0, Currency::CLP).minor, 1500);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(2500, Currency::MXN).display(), "$25.00");
        assert_eq!(Money::new(990, Currency::PEN).display(), "S/9.90");
        assert_eq!(Money::new(1500, Currency::CLP).display(), "$1500");
    }

    #[test]
    fn test_checked_add_rejects_mismatch() {
        let mxn = Money::new(100, Currency::MXN);
        let usd = Money::new(100, Currency::USD);
        assert_eq!(mxn.checked_add(&usd), None);
        assert_eq!(mxn.checked_add(&mxn), Some(Money::new(200, Currency::MXN)));
    }

    #[test]
    fn test_checked_mul_overflow() {
        assert!(Money::new(i64::MAX, Currency::MXN).checked_mul(2).is_none());
        assert_eq!(
            Money::new(i64::MAX, Currency::MXN).saturating_mul(2).minor,
            i64::MAX
        );
    }

    #[test]
    fn test_deserialize_decimal_accepts_strings() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(deserialize_with = "deserialize_decimal")]
            precio: f64,
        }

        let a: Row = serde_json::from_str(r#"{"precio": 12.5}"#).unwrap();
        let b: Row = serde_json::from_str(r#"{"precio": "12.50"}"#).unwrap();
        assert_eq!(a.precio, b.precio);

        assert!(serde_json::from_str::<Row>(r#"{"precio": "doce"}"#).is_err());
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("mxn"), Some(Currency::MXN));
        assert_eq!(Currency::from_code("XYZ"), None);
    }
}
