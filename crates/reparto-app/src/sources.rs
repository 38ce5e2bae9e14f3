//! Poll sources backed by the marketplace API.

use crate::poll::PollSource;
use async_trait::async_trait;
use reparto_commerce::approval::{PendingNegocio, PendingRepartidor};
use reparto_commerce::checkout::AssignedOrder;
use reparto_data::{FetchError, MarketplaceApi};
use std::sync::Arc;

pub struct PendingNegociosSource(pub Arc<dyn MarketplaceApi>);

#[async_trait]
impl PollSource for PendingNegociosSource {
    type Item = PendingNegocio;

    fn name(&self) -> &'static str {
        "pending_negocios"
    }

    async fn fetch(&self) -> Result<Vec<PendingNegocio>, FetchError> {
        self.0.pending_negocios().await
    }
}

pub struct PendingRepartidoresSource(pub Arc<dyn MarketplaceApi>);

#[async_trait]
impl PollSource for PendingRepartidoresSource {
    type Item = PendingRepartidor;

    fn name(&self) -> &'static str {
        "pending_repartidores"
    }

    async fn fetch(&self) -> Result<Vec<PendingRepartidor>, FetchError> {
        self.0.pending_repartidores().await
    }
}

pub struct AssignedOrdersSource(pub Arc<dyn MarketplaceApi>);

#[async_trait]
impl PollSource for AssignedOrdersSource {
    type Item = AssignedOrder;

    fn name(&self) -> &'static str {
        "assigned_orders"
    }

    async fn fetch(&self) -> Result<Vec<AssignedOrder>, FetchError> {
        self.0.assigned_orders().await
    }
}
