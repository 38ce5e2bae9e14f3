//! Orders assigned to the logged-in repartidor.

use crate::error::AppError;
use crate::poll::{PollHandle, Poller, Snapshot};
use crate::sources::AssignedOrdersSource;
use reparto_commerce::checkout::{AssignedOrder, OrderStatus};
use reparto_commerce::ids::OrderId;
use reparto_data::MarketplaceApi;
use std::sync::Arc;
use std::time::Duration;

pub struct DeliveriesView {
    api: Arc<dyn MarketplaceApi>,
    orders: PollHandle<AssignedOrder>,
}

impl DeliveriesView {
    /// Start polling assigned orders. Must be called inside a tokio runtime.
    pub fn open(api: Arc<dyn MarketplaceApi>, interval: Duration) -> Self {
        let orders = Poller::spawn(AssignedOrdersSource(api.clone()), interval);
        Self { api, orders }
    }

    pub fn orders(&self) -> Snapshot<AssignedOrder> {
        self.orders.snapshot()
    }

    /// Orders still in progress.
    pub fn active(&self) -> Vec<AssignedOrder> {
        self.orders
            .snapshot()
            .items
            .into_iter()
            .filter(|o| !o.status.is_terminal())
            .collect()
    }

    pub fn handle(&mut self) -> &mut PollHandle<AssignedOrder> {
        &mut self.orders
    }

    pub fn focus(&self) {
        self.orders.refresh();
    }

    /// Move an order to `to`, checking the transition against the last
    /// known status.
    pub async fn set_status(&self, order: OrderId, to: OrderStatus) -> Result<(), AppError> {
        let from = self
            .orders
            .snapshot()
            .items
            .iter()
            .find(|o| o.id == order)
            .map(|o| o.status)
            .ok_or(AppError::UnknownOrder(order))?;

        if !from.can_transition_to(to) {
            return Err(AppError::InvalidTransition { from, to });
        }

        self.api.update_order_status(order, to).await?;
        tracing::info!(order_id = %order, from = from.as_str(), to = to.as_str(), "order status updated");
        self.orders.refresh();
        Ok(())
    }

    /// Move an order one step forward. Returns the new status.
    pub async fn advance(&self, order: OrderId) -> Result<OrderStatus, AppError> {
        let from = self
            .orders
            .snapshot()
            .items
            .iter()
            .find(|o| o.id == order)
            .map(|o| o.status)
            .ok_or(AppError::UnknownOrder(order))?;

        let to = from.next().ok_or(AppError::InvalidTransition {
            from,
            to: from,
        })?;
        self.set_status(order, to).await?;
        Ok(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{assigned, FakeApi, FakeState};

    async fn opened(api: Arc<FakeApi>) -> DeliveriesView {
        let mut view = DeliveriesView::open(api, Duration::from_secs(3600));
        tokio::time::timeout(Duration::from_secs(2), view.handle().changed())
            .await
            .unwrap()
            .unwrap();
        view
    }

    fn api() -> Arc<FakeApi> {
        Arc::new(FakeApi::with_state(FakeState {
            assigned: vec![
                assigned(1, OrderStatus::Aceptado),
                assigned(2, OrderStatus::Entregado),
            ],
            ..Default::default()
        }))
    }

    #[tokio::test]
    async fn test_active_hides_terminal_orders() {
        let view = opened(api()).await;
        let ids: Vec<i64> = view.active().iter().map(|o| o.id.get()).collect();
        assert_eq!(ids, vec![1]);
    }

    #[tokio::test]
    async fn test_advance_moves_forward() {
        let api = api();
        let mut view = opened(api.clone()).await;

        assert_eq!(view.advance(OrderId::new(1)).await.unwrap(), OrderStatus::EnCamino);
        let snap = tokio::time::timeout(Duration::from_secs(2), view.handle().changed())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(snap.items[0].status, OrderStatus::EnCamino);
    }

    #[tokio::test]
    async fn test_terminal_order_cannot_move() {
        let view = opened(api()).await;
        assert!(matches!(
            view.advance(OrderId::new(2)).await,
            Err(AppError::InvalidTransition { .. })
        ));
        assert!(matches!(
            view.set_status(OrderId::new(1), OrderStatus::Pendiente).await,
            Err(AppError::InvalidTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_order() {
        let view = opened(api()).await;
        assert!(matches!(
            view.advance(OrderId::new(99)).await,
            Err(AppError::UnknownOrder(_))
        ));
    }
}
