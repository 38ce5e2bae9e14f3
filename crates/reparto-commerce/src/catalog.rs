//! Catalog records as served by the marketplace API.

use crate::cart::NewLine;
use crate::error::CommerceError;
use crate::ids::{NegocioId, ProductId};
use crate::money::{deserialize_decimal, Currency, Money};
use serde::{Deserialize, Serialize};

/// A product listed by a negocio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    /// Unit price as a decimal.
    #[serde(rename = "precio", deserialize_with = "deserialize_decimal")]
    pub price: f64,
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
    /// Units the negocio reports in stock. Informational only.
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
    #[serde(default)]
    pub negocio_id: Option<NegocioId>,
}

impl Product {
    /// Build the candidate cart line for this product.
    ///
    /// Fails only when the catalog price is negative or not finite.
    pub fn to_cart_line(&self, currency: Currency) -> Result<NewLine, CommerceError> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CommerceError::InvalidPrice {
                product: self.id.to_string(),
                price: self.price,
            });
        }

        Ok(NewLine {
            product_id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            unit_price: Money::from_decimal(self.price, currency),
            category: self.category.clone(),
            stock_hint: self.stock,
            image_ref: self.image.clone(),
            negocio_id: self.negocio_id,
        })
    }

    /// Whether the negocio reports this product as available.
    pub fn in_stock(&self) -> bool {
        self.stock.map_or(true, |s| s > 0)
    }
}
