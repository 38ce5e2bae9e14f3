//! Admin approval queues.

use crate::error::AppError;
use crate::poll::{PollHandle, Poller, Snapshot};
use crate::sources::{PendingNegociosSource, PendingRepartidoresSource};
use reparto_commerce::approval::{ApprovalDecision, ApprovalKind, PendingNegocio, PendingRepartidor};
use reparto_data::MarketplaceApi;
use std::sync::Arc;
use std::time::Duration;

/// Pending negocio and repartidor registrations, kept fresh by polling.
///
/// Polling stops when the view is dropped.
pub struct ApprovalsView {
    api: Arc<dyn MarketplaceApi>,
    negocios: PollHandle<PendingNegocio>,
    repartidores: PollHandle<PendingRepartidor>,
}

impl ApprovalsView {
    /// Start polling both queues. Must be called inside a tokio runtime.
    pub fn open(api: Arc<dyn MarketplaceApi>, interval: Duration) -> Self {
        let negocios = Poller::spawn(PendingNegociosSource(api.clone()), interval);
        let repartidores = Poller::spawn(PendingRepartidoresSource(api.clone()), interval);
        Self {
            api,
            negocios,
            repartidores,
        }
    }

    pub fn negocios(&self) -> Snapshot<PendingNegocio> {
        self.negocios.snapshot()
    }

    pub fn repartidores(&self) -> Snapshot<PendingRepartidor> {
        self.repartidores.snapshot()
    }

    pub fn negocios_handle(&mut self) -> &mut PollHandle<PendingNegocio> {
        &mut self.negocios
    }

    pub fn repartidores_handle(&mut self) -> &mut PollHandle<PendingRepartidor> {
        &mut self.repartidores
    }

    /// Re-fetch both queues now.
    pub fn focus(&self) {
        self.negocios.refresh();
        self.repartidores.refresh();
    }

    /// Record a verdict and refresh the affected queue.
    pub async fn decide(
        &self,
        kind: ApprovalKind,
        id: i64,
        decision: ApprovalDecision,
    ) -> Result<(), AppError> {
        self.api.decide_registration(kind, id, decision).await?;
        match kind {
            ApprovalKind::Negocio => self.negocios.refresh(),
            ApprovalKind::Repartidor => self.repartidores.refresh(),
        }
        Ok(())
    }
}
