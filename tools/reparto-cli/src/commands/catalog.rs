//! List a negocio's products.

use anyhow::{Context as _, Result};
use reparto_commerce::catalog::Product;
use reparto_commerce::ids::NegocioId;
use reparto_commerce::money::{Currency, Money};

use super::CatalogArgs;
use crate::context::Context;
use crate::output::{truncate, Output};

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let session = ctx.session()?;
    let mut catalog = session.catalog(NegocioId::new(args.negocio));

    let spinner = ctx.output.spinner("Loading catalog...");
    let result = catalog.load().await.map(|p| p.to_vec());
    spinner.finish_and_clear();
    let products = result.with_context(|| format!("Failed to load negocio {}", args.negocio))?;

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!("Negocio {}", args.negocio));
    if products.is_empty() {
        ctx.output.info("No products listed");
        return Ok(());
    }
    print_products(&ctx.output, &products, session.cart().currency());
    Ok(())
}

pub(crate) fn print_products(output: &Output, products: &[Product], currency: Currency) {
    let widths = [6, 28, 12, 16, 8];
    output.table_row(&["ID", "NAME", "PRICE", "CATEGORY", "STOCK"], &widths);
    for product in products {
        let id = product.id.to_string();
        let name = truncate(&product.name, widths[1]);
        let price = Money::from_decimal(product.price, currency).display();
        let category = truncate(product.category.as_deref().unwrap_or("-"), widths[3]);
        let stock = match product.stock {
            Some(n) if n <= 0 => "out".to_string(),
            Some(n) => n.to_string(),
            None => "-".to_string(),
        };
        output.table_row(&[&id, &name, &price, &category, &stock], &widths);
    }
}
