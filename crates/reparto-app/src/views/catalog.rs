//! A negocio's product list.

use crate::error::AppError;
use crate::store::CartStore;
use reparto_commerce::catalog::Product;
use reparto_commerce::ids::{NegocioId, ProductId};
use reparto_data::MarketplaceApi;
use std::sync::Arc;

pub struct CatalogView {
    api: Arc<dyn MarketplaceApi>,
    cart: CartStore,
    negocio: NegocioId,
    products: Vec<Product>,
}

impl CatalogView {
    pub fn new(api: Arc<dyn MarketplaceApi>, cart: CartStore, negocio: NegocioId) -> Self {
        Self {
            api,
            cart,
            negocio,
            products: Vec::new(),
        }
    }

    pub fn negocio(&self) -> NegocioId {
        self.negocio
    }

    /// Fetch the catalog, replacing whatever was loaded before.
    pub async fn load(&mut self) -> Result<&[Product], AppError> {
        let mut products = self.api.list_products(self.negocio).await?;
        // Older backends omit the owner on per-negocio listings.
        for product in &mut products {
            product.negocio_id.get_or_insert(self.negocio);
        }
        tracing::debug!(negocio_id = %self.negocio, count = products.len(), "catalog loaded");
        self.products = products;
        Ok(&self.products)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Put one unit of a loaded product in the cart.
    pub fn add_to_cart(&self, product_id: ProductId) -> Result<(), AppError> {
        let product = self
            .products
            .iter()
            .find(|p| p.id == product_id)
            .ok_or(AppError::UnknownProduct(product_id))?;
        self.cart.add_catalog_product(product)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{product, FakeApi, FakeState};
    use reparto_commerce::money::{Currency, Money};

    fn view() -> (CatalogView, CartStore) {
        let api = FakeApi::with_state(FakeState {
            products: vec![product(1, 10.0, 3), product(2, 5.0, 3), product(9, 1.0, 4)],
            ..Default::default()
        });
        let cart = CartStore::new(Currency::MXN);
        (
            CatalogView::new(Arc::new(api), cart.clone(), NegocioId::new(3)),
            cart,
        )
    }

    #[tokio::test]
    async fn test_load_lists_only_this_negocio() {
        let (mut view, _) = view();
        let ids: Vec<i64> = view.load().await.unwrap().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_add_to_cart_merges() {
        let (mut view, cart) = view();
        view.load().await.unwrap();

        view.add_to_cart(ProductId::new(1)).unwrap();
        view.add_to_cart(ProductId::new(1)).unwrap();
        view.add_to_cart(ProductId::new(2)).unwrap();

        let snap = cart.snapshot();
        assert_eq!(snap.lines.len(), 2);
        assert_eq!(snap.lines[0].quantity, 2);
        assert_eq!(snap.totals.net, Money::new(2500, Currency::MXN));
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let (mut view, cart) = view();
        view.load().await.unwrap();
        assert!(matches!(
            view.add_to_cart(ProductId::new(9)),
            Err(AppError::UnknownProduct(_))
        ));
        assert!(cart.is_empty());
    }
}
