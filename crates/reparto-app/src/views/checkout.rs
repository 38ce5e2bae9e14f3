//! Order submission.

use crate::error::CheckoutError;
use crate::store::CartStore;
use reparto_commerce::checkout::{DeliveryAddress, OrderReceipt, OrderRequest};
use reparto_commerce::ids::{NegocioId, ProductId};
use reparto_data::MarketplaceApi;
use std::sync::Arc;

pub struct CheckoutView {
    api: Arc<dyn MarketplaceApi>,
    cart: CartStore,
}

impl CheckoutView {
    pub fn new(api: Arc<dyn MarketplaceApi>, cart: CartStore) -> Self {
        Self { api, cart }
    }

    /// The payload that [`submit`](Self::submit) would send.
    pub fn preview(
        &self,
        address: &str,
        negocio: Option<NegocioId>,
    ) -> Result<OrderRequest, CheckoutError> {
        Ok(self.build(address, negocio)?.0)
    }

    fn build(
        &self,
        address: &str,
        negocio: Option<NegocioId>,
    ) -> Result<(OrderRequest, u64), CheckoutError> {
        let address = DeliveryAddress::parse(address)?;
        let (order, revision) = self
            .cart
            .read_with_revision(|cart| OrderRequest::from_cart(cart, address, negocio));
        Ok((order?, revision))
    }

    /// Submit the cart as an order.
    ///
    /// Once the backend accepts it, the ordered units leave the cart.
    /// Products added while the request was in flight stay. A rejected
    /// order leaves the cart untouched.
    pub async fn submit(
        &self,
        address: &str,
        negocio: Option<NegocioId>,
    ) -> Result<OrderReceipt, CheckoutError> {
        let (order, revision) = self.build(address, negocio)?;

        match self.api.submit_order(&order).await {
            Ok(receipt) => {
                let ordered: Vec<(ProductId, u32)> = order
                    .productos
                    .iter()
                    .map(|item| (item.producto_id, item.cantidad))
                    .collect();
                self.cart.settle_order(revision, &ordered);
                tracing::info!(order_id = %receipt.id, total = %order.total, "order placed");
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!(error = %e, negocio_id = %order.negocio_id, "order rejected");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{product, FakeApi, FakeState};
    use reparto_commerce::error::CommerceError;
    use reparto_commerce::money::{Currency, Money};

    fn setup(reject_orders: bool) -> (Arc<FakeApi>, CartStore, CheckoutView) {
        let api = Arc::new(FakeApi::with_state(FakeState {
            reject_orders,
            ..Default::default()
        }));
        let cart = CartStore::new(Currency::MXN);
        let view = CheckoutView::new(api.clone(), cart.clone());
        (api, cart, view)
    }

    #[tokio::test]
    async fn test_successful_submit_clears_cart() {
        let (api, cart, view) = setup(false);
        cart.add_catalog_product(&product(1, 10.0, 3)).unwrap();
        cart.add_catalog_product(&product(1, 10.0, 3)).unwrap();
        cart.add_catalog_product(&product(2, 5.0, 3)).unwrap();

        let receipt = view.submit("Calle 5 #120", None).await.unwrap();
        assert_eq!(receipt.id.get(), 1);
        assert!(cart.is_empty());

        let state = api.state();
        let sent = &state.submitted[0];
        assert_eq!(sent.negocio_id, NegocioId::new(3));
        assert_eq!(sent.total, Money::new(2500, Currency::MXN));
        assert_eq!(sent.productos.len(), 2);
    }

    #[tokio::test]
    async fn test_products_added_during_submit_survive() {
        let (api, cart, view) = setup(false);
        cart.add_catalog_product(&product(1, 10.0, 3)).unwrap();

        let during = cart.clone();
        api.state().on_submit = Some(Box::new(move || {
            during.add_catalog_product(&product(2, 5.0, 3)).unwrap();
        }));

        view.submit("Calle 5 #120", None).await.unwrap();

        let snap = cart.snapshot();
        assert_eq!(snap.lines.len(), 1);
        assert_eq!(snap.lines[0].product_id, ProductId::new(2));
        assert_eq!(snap.lines[0].quantity, 1);
        assert_eq!(api.state().submitted[0].productos.len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_submit_keeps_cart() {
        let (_, cart, view) = setup(true);
        cart.add_catalog_product(&product(1, 10.0, 3)).unwrap();

        let err = view.submit("Calle 5", None).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Rejected(_)));
        assert_eq!(cart.snapshot().item_count, 1);
    }

    #[tokio::test]
    async fn test_invalid_cart_never_reaches_api() {
        let (api, cart, view) = setup(false);

        let err = view.submit("Calle 5", None).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Invalid(CommerceError::EmptyCart)));

        cart.add_catalog_product(&product(1, 10.0, 3)).unwrap();
        cart.add_catalog_product(&product(2, 10.0, 4)).unwrap();
        let err = view.submit("Calle 5", None).await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Invalid(CommerceError::MixedNegocios(_))
        ));

        let err = view.submit("  ", None).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Invalid(CommerceError::MissingAddress)));

        assert!(api.state().submitted.is_empty());
        assert_eq!(cart.snapshot().lines.len(), 2);
    }
}
