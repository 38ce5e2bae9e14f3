//! In-memory marketplace backend for view tests.

use async_trait::async_trait;
use reparto_commerce::approval::{ApprovalDecision, ApprovalKind, PendingNegocio, PendingRepartidor};
use reparto_commerce::auth::{Role, Session};
use reparto_commerce::catalog::Product;
use reparto_commerce::checkout::{AssignedOrder, OrderReceipt, OrderRequest, OrderStatus};
use reparto_commerce::ids::{NegocioId, OrderId, ProductId, RepartidorId, UserId};
use reparto_data::{FetchError, MarketplaceApi};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeState {
    pub products: Vec<Product>,
    pub pending_negocios: Vec<PendingNegocio>,
    pub pending_repartidores: Vec<PendingRepartidor>,
    pub assigned: Vec<AssignedOrder>,
    pub submitted: Vec<OrderRequest>,
    pub decisions: Vec<(ApprovalKind, i64, ApprovalDecision)>,
    pub reject_orders: bool,
    /// Runs inside `submit_order`, while the request is in flight.
    pub on_submit: Option<Box<dyn FnOnce() + Send>>,
}

#[derive(Default)]
pub struct FakeApi {
    pub state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn with_state(state: FakeState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }
}

pub fn product(id: i64, price: f64, negocio: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Producto {id}"),
        description: String::new(),
        price,
        category: None,
        stock: None,
        image: None,
        negocio_id: Some(NegocioId::new(negocio)),
    }
}

pub fn pending_negocio(id: i64) -> PendingNegocio {
    PendingNegocio {
        id: NegocioId::new(id),
        name: format!("Negocio {id}"),
        email: None,
        address: None,
        category: None,
        registered_at: None,
    }
}

pub fn pending_repartidor(id: i64) -> PendingRepartidor {
    PendingRepartidor {
        id: RepartidorId::new(id),
        name: format!("Repartidor {id}"),
        email: None,
        phone: None,
        vehicle: None,
        registered_at: None,
    }
}

pub fn assigned(id: i64, status: OrderStatus) -> AssignedOrder {
    AssignedOrder {
        id: OrderId::new(id),
        negocio: "Tacos Don Memo".to_string(),
        direccion_entrega: "Calle 5".to_string(),
        total: 120.0,
        status,
        cliente: None,
    }
}

#[async_trait]
impl MarketplaceApi for FakeApi {
    async fn login(&self, email: &str, _password: &str) -> Result<Session, FetchError> {
        let role = if email.starts_with("admin") {
            Role::Admin
        } else {
            Role::Cliente
        };
        Ok(Session {
            token: "fake-token".to_string(),
            role,
            user_id: UserId::new(1),
        })
    }

    async fn list_products(&self, negocio: NegocioId) -> Result<Vec<Product>, FetchError> {
        Ok(self
            .state()
            .products
            .iter()
            .filter(|p| p.negocio_id == Some(negocio))
            .cloned()
            .collect())
    }

    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderReceipt, FetchError> {
        let mut state = self.state();
        if let Some(hook) = state.on_submit.take() {
            hook();
        }
        if state.reject_orders {
            return Err(FetchError::HttpError {
                status: 422,
                message: "Negocio cerrado".to_string(),
            });
        }
        state.submitted.push(order.clone());
        Ok(OrderReceipt {
            id: OrderId::new(state.submitted.len() as i64),
            status: OrderStatus::Pendiente,
            message: None,
        })
    }

    async fn pending_negocios(&self) -> Result<Vec<PendingNegocio>, FetchError> {
        Ok(self.state().pending_negocios.clone())
    }

    async fn pending_repartidores(&self) -> Result<Vec<PendingRepartidor>, FetchError> {
        Ok(self.state().pending_repartidores.clone())
    }

    async fn decide_registration(
        &self,
        kind: ApprovalKind,
        id: i64,
        decision: ApprovalDecision,
    ) -> Result<(), FetchError> {
        let mut state = self.state();
        match kind {
            ApprovalKind::Negocio => state.pending_negocios.retain(|p| p.id.get() != id),
            ApprovalKind::Repartidor => state.pending_repartidores.retain(|p| p.id.get() != id),
        }
        state.decisions.push((kind, id, decision));
        Ok(())
    }

    async fn assigned_orders(&self) -> Result<Vec<AssignedOrder>, FetchError> {
        Ok(self.state().assigned.clone())
    }

    async fn update_order_status(
        &self,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<(), FetchError> {
        let mut state = self.state();
        match state.assigned.iter_mut().find(|o| o.id == order) {
            Some(o) => {
                o.status = status;
                Ok(())
            }
            None => Err(FetchError::HttpError {
                status: 404,
                message: "Pedido no encontrado".to_string(),
            }),
        }
    }
}
