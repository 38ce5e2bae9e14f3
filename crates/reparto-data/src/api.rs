//! Typed access to the marketplace endpoints.

use crate::{ClientRequestBuilder, FetchClient, FetchError};
use async_trait::async_trait;
use reparto_commerce::approval::{ApprovalDecision, ApprovalKind, PendingNegocio, PendingRepartidor};
use reparto_commerce::auth::{Credentials, Session};
use reparto_commerce::catalog::Product;
use reparto_commerce::checkout::{AssignedOrder, OrderReceipt, OrderRequest, OrderStatus};
use reparto_commerce::ids::{NegocioId, OrderId};
use serde::Serialize;
use std::sync::RwLock;

/// Endpoint paths, relative to the API base URL.
pub mod paths {
    use reparto_commerce::approval::{ApprovalDecision, ApprovalKind};
    use reparto_commerce::ids::{NegocioId, OrderId};

    pub const LOGIN: &str = "/auth/login";
    pub const ORDERS: &str = "/pedidos";
    pub const ASSIGNED_ORDERS: &str = "/repartidor/pedidos";

    pub fn products(negocio: NegocioId) -> String {
        format!("/negocios/{}/productos", negocio)
    }

    pub fn pending(kind: ApprovalKind) -> String {
        format!("/admin/{}/pendientes", kind.path_segment())
    }

    pub fn decision(kind: ApprovalKind, id: i64, decision: ApprovalDecision) -> String {
        format!("/admin/{}/{}/{}", kind.path_segment(), id, decision.path_segment())
    }

    pub fn order_status(order: OrderId) -> String {
        format!("/pedidos/{}/estado", order)
    }
}

/// Everything the client views ask of the backend.
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    /// Authenticate; later calls carry the returned token.
    async fn login(&self, email: &str, password: &str) -> Result<Session, FetchError>;

    async fn list_products(&self, negocio: NegocioId) -> Result<Vec<Product>, FetchError>;

    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderReceipt, FetchError>;

    async fn pending_negocios(&self) -> Result<Vec<PendingNegocio>, FetchError>;

    async fn pending_repartidores(&self) -> Result<Vec<PendingRepartidor>, FetchError>;

    /// Approve or reject a pending registration.
    async fn decide_registration(
        &self,
        kind: ApprovalKind,
        id: i64,
        decision: ApprovalDecision,
    ) -> Result<(), FetchError>;

    /// Orders assigned to the logged-in repartidor.
    async fn assigned_orders(&self) -> Result<Vec<AssignedOrder>, FetchError>;

    async fn update_order_status(&self, order: OrderId, status: OrderStatus)
        -> Result<(), FetchError>;
}

/// [`MarketplaceApi`] over HTTP.
pub struct HttpMarketplaceApi {
    client: FetchClient,
    token: RwLock<Option<String>>,
}

impl HttpMarketplaceApi {
    pub fn new(client: FetchClient) -> Self {
        Self {
            client,
            token: RwLock::new(None),
        }
    }

    /// Resume with a token saved from an earlier login.
    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.set_token(Some(token.into()));
        self
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn logout(&self) {
        self.set_token(None);
    }

    fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = token;
    }

    fn authed(&self, request: ClientRequestBuilder) -> Result<ClientRequestBuilder, FetchError> {
        match self.token() {
            Some(token) => Ok(request.bearer_auth(token)),
            None => Err(FetchError::Unauthorized("not logged in".to_string())),
        }
    }
}

#[derive(Serialize)]
struct StatusUpdate {
    estado: OrderStatus,
}

#[async_trait]
impl MarketplaceApi for HttpMarketplaceApi {
    async fn login(&self, email: &str, password: &str) -> Result<Session, FetchError> {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let session: Session = self
            .client
            .post(paths::LOGIN)
            .json(&credentials)?
            .send()
            .await?
            .error_for_status()?
            .json()?;

        tracing::info!(role = %session.role, user_id = %session.user_id, "logged in");
        self.set_token(Some(session.token.clone()));
        Ok(session)
    }

    async fn list_products(&self, negocio: NegocioId) -> Result<Vec<Product>, FetchError> {
        let request = self.authed(self.client.get(paths::products(negocio)))?;
        request.send().await?.error_for_status()?.json()
    }

    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderReceipt, FetchError> {
        let request = self.authed(self.client.post(paths::ORDERS))?.json(order)?;
        let receipt: OrderReceipt = request.send().await?.error_for_status()?.json()?;
        tracing::info!(order_id = %receipt.id, negocio_id = %order.negocio_id, "order submitted");
        Ok(receipt)
    }

    async fn pending_negocios(&self) -> Result<Vec<PendingNegocio>, FetchError> {
        let request = self.authed(self.client.get(paths::pending(ApprovalKind::Negocio)))?;
        request.send().await?.error_for_status()?.json()
    }

    async fn pending_repartidores(&self) -> Result<Vec<PendingRepartidor>, FetchError> {
        let request = self.authed(self.client.get(paths::pending(ApprovalKind::Repartidor)))?;
        request.send().await?.error_for_status()?.json()
    }

    async fn decide_registration(
        &self,
        kind: ApprovalKind,
        id: i64,
        decision: ApprovalDecision,
    ) -> Result<(), FetchError> {
        let request = self.authed(self.client.post(paths::decision(kind, id, decision)))?;
        request.send().await?.error_for_status()?;
        tracing::info!(%kind, id, ?decision, "registration decided");
        Ok(())
    }

    async fn assigned_orders(&self) -> Result<Vec<AssignedOrder>, FetchError> {
        let request = self.authed(self.client.get(paths::ASSIGNED_ORDERS))?;
        request.send().await?.error_for_status()?.json()
    }

    async fn update_order_status(
        &self,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<(), FetchError> {
        let request = self
            .authed(self.client.patch(paths::order_status(order)))?
            .json(&StatusUpdate { estado: status })?;
        request.send().await?.error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientConfig;

    fn api() -> HttpMarketplaceApi {
        let client = FetchClient::new(ClientConfig::default())
            .unwrap()
            .with_base_url("http://127.0.0.1:9");
        HttpMarketplaceApi::new(client)
    }

    #[test]
    fn test_paths() {
        assert_eq!(paths::products(NegocioId::new(4)), "/negocios/4/productos");
        assert_eq!(
            paths::pending(ApprovalKind::Repartidor),
            "/admin/repartidores/pendientes"
        );
        assert_eq!(
            paths::decision(ApprovalKind::Negocio, 12, ApprovalDecision::Approve),
            "/admin/negocios/12/aprobar"
        );
        assert_eq!(paths::order_status(OrderId::new(8)), "/pedidos/8/estado");
    }

    #[tokio::test]
    async fn test_authed_calls_require_login() {
        let api = api();
        let err = api.pending_negocios().await.unwrap_err();
        assert!(matches!(err, FetchError::Unauthorized(_)));
    }

    #[test]
    fn test_token_lifecycle() {
        let api = api().with_token("saved");
        assert_eq!(api.token().as_deref(), Some("saved"));
        api.logout();
        assert!(api.token().is_none());
    }

    #[test]
    fn test_status_update_body() {
        let body = serde_json::to_value(StatusUpdate {
            estado: OrderStatus::EnCamino,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"estado": "en_camino"}));
    }
}
