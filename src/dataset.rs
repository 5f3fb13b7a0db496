use anyhow::{Context, Result};
use log::info;

use crate::{
    config::GeneratorConfig,
    customers,
    defects::{self, DefectReport},
    model::{Customer, Product, Sale, Store},
    products,
    sales::SalesSimulator,
    sampling, stores,
};

/// The four generated tables plus the top sets that shaped them.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub stores: Vec<Store>,
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub sales: Vec<Sale>,
    pub top_store_ids: Vec<String>,
    pub top_product_ids: Vec<String>,
    pub defects: DefectReport,
}

/// Runs every stage against one seeded RNG. Stage order is fixed so that a
/// given config always produces the same tables.
pub fn generate(config: &GeneratorConfig) -> Result<Dataset> {
    config.validate().context("Validating generator config")?;
    let mut rng = sampling::seeded_rng(config.seed);

    let stores = stores::build_stores(config, &mut rng);
    let top_store_ids = stores::top_store_ids(&stores, config);
    info!(
        "Generated {} store(s), {} top",
        stores.len(),
        top_store_ids.len()
    );

    let products = products::build_products(config, &mut rng).context("Building products")?;
    let top_product_ids = products::top_product_ids(&products, config.top_product_percentile);
    info!(
        "Generated {} product(s), {} top",
        products.len(),
        top_product_ids.len()
    );

    let customers =
        customers::build_customers(config, &mut rng).context("Building customers")?;
    info!("Generated {} customer row(s)", customers.len());

    let simulator = SalesSimulator::new(
        config,
        &products,
        &top_product_ids,
        &stores,
        &top_store_ids,
        &customers,
    )?;
    let mut sales = simulator.simulate(&mut rng);
    let defects = defects::inject(&mut sales, &stores, &config.defects, &mut rng);
    info!(
        "Generated {} sale row(s) ({} duplicated)",
        sales.len(),
        defects.duplicated_rows
    );

    Ok(Dataset {
        stores,
        products,
        customers,
        sales,
        top_store_ids,
        top_product_ids,
        defects,
    })
}
