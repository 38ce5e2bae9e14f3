//! Order payloads and order records.

use crate::cart::{Cart, CartNegocio};
use crate::checkout::DeliveryAddress;
use crate::error::CommerceError;
use crate::ids::{NegocioId, OrderId, ProductId};
use crate::money::{deserialize_decimal, serialize_decimal, Money};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Order lifecycle as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed, waiting for the negocio.
    #[default]
    Pendiente,
    /// Accepted by the negocio and assigned to a repartidor.
    Aceptado,
    /// Picked up, on the way.
    EnCamino,
    Entregado,
    Cancelado,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pendiente => "pendiente",
            OrderStatus::Aceptado => "aceptado",
            OrderStatus::EnCamino => "en_camino",
            OrderStatus::Entregado => "entregado",
            OrderStatus::Cancelado => "cancelado",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pendiente => "Pending",
            OrderStatus::Aceptado => "Accepted",
            OrderStatus::EnCamino => "On the way",
            OrderStatus::Entregado => "Delivered",
            OrderStatus::Cancelado => "Cancelled",
        }
    }

    /// Delivered and cancelled orders never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Entregado | OrderStatus::Cancelado)
    }

    /// The status a repartidor moves the order to next.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pendiente => Some(OrderStatus::Aceptado),
            OrderStatus::Aceptado => Some(OrderStatus::EnCamino),
            OrderStatus::EnCamino => Some(OrderStatus::Entregado),
            OrderStatus::Entregado | OrderStatus::Cancelado => None,
        }
    }

    /// Forward moves and cancellation of a live order are allowed.
    pub fn can_transition_to(&self, to: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        to == OrderStatus::Cancelado || self.next() == Some(to)
    }
}

/// Accepts wire names case-insensitively, with `-` for `_`.
impl FromStr for OrderStatus {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "pendiente" => Ok(OrderStatus::Pendiente),
            "aceptado" => Ok(OrderStatus::Aceptado),
            "en_camino" => Ok(OrderStatus::EnCamino),
            "entregado" => Ok(OrderStatus::Entregado),
            "cancelado" => Ok(OrderStatus::Cancelado),
            _ => Err(CommerceError::UnknownStatus(s.to_string())),
        }
    }
}

/// One product row of an order submission.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrderItem {
    pub producto_id: ProductId,
    pub cantidad: u32,
    #[serde(serialize_with = "serialize_decimal")]
    pub precio: Money,
}

/// Body of `POST /pedidos`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrderRequest {
    pub negocio_id: NegocioId,
    pub direccion_entrega: DeliveryAddress,
    #[serde(serialize_with = "serialize_decimal")]
    pub total: Money,
    pub productos: Vec<OrderItem>,
}

impl OrderRequest {
    /// Build the submission payload from the current cart.
    ///
    /// `negocio` is used when no line names a negocio; if lines do name
    /// one it must agree. Carts that mix negocios are rejected.
    pub fn from_cart(
        cart: &Cart,
        address: DeliveryAddress,
        negocio: Option<NegocioId>,
    ) -> Result<Self, CommerceError> {
        let negocio_id = match (cart.negocio(), negocio) {
            (CartNegocio::Empty, _) => return Err(CommerceError::EmptyCart),
            (CartNegocio::Mixed(ids), _) => return Err(CommerceError::MixedNegocios(ids)),
            (CartNegocio::Unassigned, Some(id)) => id,
            (CartNegocio::Unassigned, None) => return Err(CommerceError::MissingNegocio),
            (CartNegocio::Single(id), Some(requested)) if requested != id => {
                return Err(CommerceError::MixedNegocios(vec![id, requested]));
            }
            (CartNegocio::Single(id), _) => id,
        };

        let productos: Vec<OrderItem> = cart
            .lines()
            .map(|line| OrderItem {
                producto_id: line.product_id,
                cantidad: line.quantity,
                precio: line.unit_price,
            })
            .collect();

        // Exact total; the saturating cart total is only for display.
        let total = productos.iter().try_fold(Money::zero(cart.currency()), |acc, item| {
            item.precio
                .checked_mul(i64::from(item.cantidad))
                .and_then(|sub| acc.checked_add(&sub))
                .ok_or(CommerceError::Overflow)
        })?;

        Ok(Self {
            negocio_id,
            direccion_entrega: address,
            total,
            productos,
        })
    }
}

/// What the backend returns after accepting an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderReceipt {
    pub id: OrderId,
    #[serde(rename = "estado", default)]
    pub status: OrderStatus,
    #[serde(rename = "mensaje", default)]
    pub message: Option<String>,
}

/// An order assigned to the logged-in repartidor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssignedOrder {
    pub id: OrderId,
    /// Display name of the negocio to pick up from.
    pub negocio: String,
    pub direccion_entrega: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub total: f64,
    #[serde(rename = "estado", default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub cliente: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::NewLine;
    use crate::money::Currency;

    fn line(id: i64, price_minor: i64, negocio: Option<i64>) -> NewLine {
        NewLine {
            product_id: ProductId::new(id),
            name: format!("P{id}"),
            description: String::new(),
            unit_price: Money::new(price_minor, Currency::MXN),
            category: None,
            stock_hint: None,
            image_ref: None,
            negocio_id: negocio.map(NegocioId::new),
        }
    }

    fn address() -> DeliveryAddress {
        DeliveryAddress::parse("Calle 5 #120").unwrap()
    }

    #[test]
    fn test_order_payload_shape() {
        let mut cart = Cart::new(Currency::MXN);
        cart.add_product(line(1, 1000, Some(3)));
        cart.add_product(line(1, 1000, Some(3)));
        cart.add_product(line(2, 500, Some(3)));

        let order = OrderRequest::from_cart(&cart, address(), None).unwrap();
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "negocio_id": 3,
                "direccion_entrega": "Calle 5 #120",
                "total": 25.0,
                "productos": [
                    {"producto_id": 1, "cantidad": 2, "precio": 10.0},
                    {"producto_id": 2, "cantidad": 1, "precio": 5.0}
                ]
            })
        );
    }

    #[test]
    fn test_empty_cart_rejected() {
        let cart = Cart::new(Currency::MXN);
        assert_eq!(
            OrderRequest::from_cart(&cart, address(), Some(NegocioId::new(1))),
            Err(CommerceError::EmptyCart)
        );
    }

    #[test]
    fn test_mixed_cart_rejected() {
        let mut cart = Cart::new(Currency::MXN);
        cart.add_product(line(1, 100, Some(3)));
        cart.add_product(line(2, 100, Some(4)));
        assert!(matches!(
            OrderRequest::from_cart(&cart, address(), None),
            Err(CommerceError::MixedNegocios(_))
        ));
    }

    #[test]
    fn test_explicit_negocio_must_agree() {
        let mut cart = Cart::new(Currency::MXN);
        cart.add_product(line(1, 100, Some(3)));

        assert!(OrderRequest::from_cart(&cart, address(), Some(NegocioId::new(3))).is_ok());
        assert!(matches!(
            OrderRequest::from_cart(&cart, address(), Some(NegocioId::new(9))),
            Err(CommerceError::MixedNegocios(_))
        ));
    }

    #[test]
    fn test_unassigned_cart_needs_negocio() {
        let mut cart = Cart::new(Currency::MXN);
        cart.add_product(line(1, 100, None));

        assert_eq!(
            OrderRequest::from_cart(&cart, address(), None),
            Err(CommerceError::MissingNegocio)
        );
        let order = OrderRequest::from_cart(&cart, address(), Some(NegocioId::new(2))).unwrap();
        assert_eq!(order.negocio_id, NegocioId::new(2));
    }

    #[test]
    fn test_status_transitions() {
        assert_eq!(OrderStatus::Pendiente.next(), Some(OrderStatus::Aceptado));
        assert!(OrderStatus::Aceptado.can_transition_to(OrderStatus::EnCamino));
        assert!(OrderStatus::EnCamino.can_transition_to(OrderStatus::Cancelado));
        assert!(!OrderStatus::Pendiente.can_transition_to(OrderStatus::Entregado));
        assert!(!OrderStatus::Entregado.can_transition_to(OrderStatus::Cancelado));
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::EnCamino).unwrap(),
            "\"en_camino\""
        );
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("en-camino".parse::<OrderStatus>(), Ok(OrderStatus::EnCamino));
        assert_eq!(" Entregado ".parse::<OrderStatus>(), Ok(OrderStatus::Entregado));
        assert_eq!(
            "perdido".parse::<OrderStatus>(),
            Err(CommerceError::UnknownStatus("perdido".to_string()))
        );
    }

    #[test]
    fn test_assigned_order_deserializes() {
        let order: AssignedOrder = serde_json::from_str(
            r#"{"id": 77, "negocio": "Tacos Don Memo", "direccion_entrega": "Calle 5",
                "total": "120.00", "estado": "aceptado"}"#,
        )
        .unwrap();
        assert_eq!(order.status, OrderStatus::Aceptado);
        assert_eq!(order.total, 120.0);
        assert!(order.cliente.is_none());
    }
}
