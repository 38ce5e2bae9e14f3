//! Per-run wiring of API, cart and views.

use crate::store::CartStore;
use crate::views::{ApprovalsView, CartView, CatalogView, CheckoutView, DeliveriesView};
use reparto_commerce::ids::NegocioId;
use reparto_commerce::money::Currency;
use reparto_data::MarketplaceApi;
use std::sync::Arc;
use std::time::Duration;

/// Default refresh interval for polled queues.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Everything a running client shares between views.
///
/// Creating a session creates its cart; dropping the session (and every
/// view built from it) drops the cart.
#[derive(Clone)]
pub struct AppSession {
    api: Arc<dyn MarketplaceApi>,
    cart: CartStore,
    poll_interval: Duration,
}

impl AppSession {
    pub fn new(api: Arc<dyn MarketplaceApi>, currency: Currency) -> Self {
        Self {
            api,
            cart: CartStore::new(currency),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Gap between background refreshes. Values under
    /// [`poll::MIN_INTERVAL`](crate::poll::MIN_INTERVAL) are raised to it.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn api(&self) -> &Arc<dyn MarketplaceApi> {
        &self.api
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn catalog(&self, negocio: NegocioId) -> CatalogView {
        CatalogView::new(self.api.clone(), self.cart.clone(), negocio)
    }

    pub fn cart_view(&self) -> CartView {
        CartView::new(self.cart.clone())
    }

    pub fn checkout(&self) -> CheckoutView {
        CheckoutView::new(self.api.clone(), self.cart.clone())
    }

    /// Must be called inside a tokio runtime.
    pub fn approvals(&self) -> ApprovalsView {
        ApprovalsView::open(self.api.clone(), self.poll_interval)
    }

    /// Must be called inside a tokio runtime.
    pub fn deliveries(&self) -> DeliveriesView {
        DeliveriesView::open(self.api.clone(), self.poll_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{product, FakeApi, FakeState};
    use reparto_commerce::ids::ProductId;
    use reparto_commerce::money::Money;

    #[tokio::test]
    async fn test_views_share_one_cart() {
        let api = Arc::new(FakeApi::with_state(FakeState {
            products: vec![product(1, 10.0, 3), product(2, 5.0, 3)],
            ..Default::default()
        }));
        let session = AppSession::new(api.clone(), Currency::MXN);

        let mut catalog = session.catalog(NegocioId::new(3));
        catalog.load().await.unwrap();
        catalog.add_to_cart(ProductId::new(1)).unwrap();
        catalog.add_to_cart(ProductId::new(1)).unwrap();
        catalog.add_to_cart(ProductId::new(2)).unwrap();

        let cart_view = session.cart_view();
        assert_eq!(cart_view.render().totals.total, Money::new(2500, Currency::MXN));

        session.checkout().submit("Calle 5", None).await.unwrap();
        assert!(cart_view.render().lines.is_empty());
        assert_eq!(api.state().submitted.len(), 1);
    }
}
