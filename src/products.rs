use anyhow::Result;
use fake::{Fake, faker::company::en::CatchPhrase};
use log::debug;
use rand::Rng;

use crate::{
    config::GeneratorConfig,
    model::{CategoryLabel, Product, ProductStatus},
    sampling::{self, WeightedChoice},
};

/// Recognisable names used for the first catalog slots; the rest are filler.
const FLAGSHIP_NAMES: &[&str] = &[
    "Apple iPhone 14",
    "Apple iPhone 13",
    "Samsung Galaxy S23",
    "MacBook Pro 14",
    "MacBook Air M2",
    "Dell XPS 13",
    "HP Spectre x360",
    "Lenovo ThinkPad X1",
    "Sony WH-1000XM5",
    "Bose QC45",
    "PlayStation 5",
    "Xbox Series X",
    "Nintendo Switch",
    "Apple Watch Series 9",
    "Samsung Galaxy Watch 6",
];

const CATEGORY_WEIGHTS: &[(CategoryLabel, f64)] = &[
    (CategoryLabel::Electronics, 0.5),
    (CategoryLabel::LowercaseElectronics, 0.2),
    (CategoryLabel::AbbreviatedElectronics, 0.15),
    (CategoryLabel::Accessories, 0.15),
];

const STATUS_WEIGHTS: &[(ProductStatus, f64)] = &[
    (ProductStatus::Active, 0.85),
    (ProductStatus::Discontinued, 0.15),
];

pub const STANDARD_COST_RANGE: (f64, f64) = (80.0, 1200.0);
pub const LIST_PRICE_RANGE: (f64, f64) = (100.0, 1800.0);

pub fn build_products<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Vec<Product>> {
    let categories = WeightedChoice::new(CATEGORY_WEIGHTS)?;
    let statuses = WeightedChoice::new(STATUS_WEIGHTS)?;

    let mut products = Vec::with_capacity(config.products);
    for idx in 0..config.products {
        let name = match FLAGSHIP_NAMES.get(idx) {
            Some(name) => name.to_string(),
            None => CatchPhrase().fake_with_rng(rng),
        };
        products.push(Product {
            id: product_id(idx + 1),
            name,
            category: categories.sample(rng),
            standard_cost: rng.gen_range(STANDARD_COST_RANGE.0..STANDARD_COST_RANGE.1),
            list_price: rng.gen_range(LIST_PRICE_RANGE.0..LIST_PRICE_RANGE.1),
            status: statuses.sample(rng),
        });
    }

    // Inflated costs can push cost above list price.
    for idx in sampling::pick_subset(rng, products.len(), config.loss_maker_count) {
        products[idx].standard_cost *= config.loss_maker_cost_factor;
    }
    Ok(products)
}

/// The most expensive `floor(len * percentile)` products, priciest first.
pub fn top_product_ids(products: &[Product], percentile: f64) -> Vec<String> {
    let take = (products.len() as f64 * percentile).floor() as usize;
    let mut ranked = products.iter().collect::<Vec<_>>();
    ranked.sort_by(|a, b| b.list_price.total_cmp(&a.list_price));
    let ids = ranked
        .into_iter()
        .take(take)
        .map(|product| product.id.clone())
        .collect::<Vec<_>>();
    debug!("Top products ({}): {ids:?}", ids.len());
    ids
}

pub fn product_id(position: usize) -> String {
    format!("P{position:04}")
}
