//! Transaction simulation.
//!
//! Each order draws, in a fixed sequence: a date, a base quantity, a product
//! (biased toward the top set), a store (biased toward the top set), a
//! discount, an optional loss flip, a customer and a status. Revenue and
//! profit are derived from those draws.

use std::collections::HashSet;

use anyhow::{Context, Result, anyhow, ensure};
use chrono::Datelike;
use rand::{Rng, distributions::Distribution};
use rand_distr::Poisson;

use crate::{
    config::GeneratorConfig,
    model::{Customer, OrderStatus, Product, Sale, Store},
    sampling::{self, WeightedChoice},
};

const TOP_PRODUCT_DISCOUNTS: &[Option<f64>] = &[Some(0.0), Some(0.1), None];
const OTHER_PRODUCT_DISCOUNTS: &[Option<f64>] = &[Some(0.2), Some(0.3), Some(0.4), None];

const ORDER_STATUS_WEIGHTS: &[(OrderStatus, f64)] = &[
    (OrderStatus::Completed, 2.0),
    (OrderStatus::Cancelled, 1.0),
    (OrderStatus::Returned, 1.0),
];

/// `quantity * unit_price * (1 - discount)`, a missing discount counting as none.
pub fn revenue(quantity: u32, unit_price: f64, discount: Option<f64>) -> f64 {
    f64::from(quantity) * unit_price * (1.0 - discount.unwrap_or(0.0))
}

pub fn gross_profit(revenue: f64, quantity: u32, unit_cost: f64) -> f64 {
    revenue - f64::from(quantity) * unit_cost
}

pub fn order_id(position: usize) -> String {
    format!("O{position:06}")
}

/// Read-only lookups over the dimension tables plus the fixed distributions
/// used for every order.
pub struct SalesSimulator<'a> {
    config: &'a GeneratorConfig,
    products: &'a [Product],
    top_products: Vec<&'a Product>,
    top_product_ids: HashSet<&'a str>,
    stores: &'a [Store],
    top_stores: Vec<&'a Store>,
    top_store_ids: HashSet<&'a str>,
    customers: &'a [Customer],
    growth_quantity: Poisson<f64>,
    decline_quantity: Poisson<f64>,
    statuses: WeightedChoice<OrderStatus>,
}

impl<'a> SalesSimulator<'a> {
    pub fn new(
        config: &'a GeneratorConfig,
        products: &'a [Product],
        top_product_ids: &'a [String],
        stores: &'a [Store],
        top_store_ids: &'a [String],
        customers: &'a [Customer],
    ) -> Result<Self> {
        ensure!(!products.is_empty(), "Cannot simulate sales without products");
        ensure!(!stores.is_empty(), "Cannot simulate sales without stores");
        ensure!(!customers.is_empty(), "Cannot simulate sales without customers");

        let top_product_ids = top_product_ids.iter().map(String::as_str).collect::<HashSet<_>>();
        let top_store_ids = top_store_ids.iter().map(String::as_str).collect::<HashSet<_>>();
        let top_products = products
            .iter()
            .filter(|p| top_product_ids.contains(p.id.as_str()))
            .collect::<Vec<_>>();
        let top_stores = stores
            .iter()
            .filter(|s| top_store_ids.contains(s.id.as_str()))
            .collect::<Vec<_>>();
        ensure!(!top_products.is_empty(), "Top product set is empty");
        ensure!(!top_stores.is_empty(), "Top store set is empty");

        let growth_quantity = Poisson::new(config.growth_mean_quantity)
            .map_err(|err| anyhow!("Invalid growth quantity mean: {err}"))?;
        let decline_quantity = Poisson::new(config.decline_mean_quantity)
            .map_err(|err| anyhow!("Invalid decline quantity mean: {err}"))?;
        let statuses =
            WeightedChoice::new(ORDER_STATUS_WEIGHTS).context("Building order status weights")?;

        Ok(Self {
            config,
            products,
            top_products,
            top_product_ids,
            stores,
            top_stores,
            top_store_ids,
            customers,
            growth_quantity,
            decline_quantity,
            statuses,
        })
    }

    pub fn simulate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Sale> {
        (0..self.config.orders)
            .map(|idx| self.next_sale(idx + 1, rng))
            .collect()
    }

    pub fn is_top_product(&self, product_id: &str) -> bool {
        self.top_product_ids.contains(product_id)
    }

    pub fn is_top_store(&self, store_id: &str) -> bool {
        self.top_store_ids.contains(store_id)
    }

    fn next_sale<R: Rng + ?Sized>(&self, position: usize, rng: &mut R) -> Sale {
        let order_date =
            sampling::uniform_date(rng, self.config.start_date, self.config.end_date);

        let drawn: f64 = if order_date.year() <= self.config.growth_cutoff_year {
            self.growth_quantity.sample(rng)
        } else {
            self.decline_quantity.sample(rng)
        };
        let base_quantity = drawn as i64;

        let (product, quantity) = if rng.gen_bool(self.config.top_product_share) {
            let product = self.top_products[sampling::pick_index(rng, self.top_products.len())];
            (product, base_quantity.saturating_add(rng.gen_range(1..4)).max(1))
        } else {
            let product = &self.products[sampling::pick_index(rng, self.products.len())];
            (product, base_quantity.saturating_sub(rng.gen_range(0..2)).max(1))
        };
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let store = if rng.gen_bool(self.config.top_store_share) {
            self.top_stores[sampling::pick_index(rng, self.top_stores.len())]
        } else {
            &self.stores[sampling::pick_index(rng, self.stores.len())]
        };

        let product_is_top = self.is_top_product(&product.id);
        let discounts = if product_is_top {
            TOP_PRODUCT_DISCOUNTS
        } else {
            OTHER_PRODUCT_DISCOUNTS
        };
        let discount = discounts[sampling::pick_index(rng, discounts.len())];

        let unit_price = product.list_price;
        let cost = product.standard_cost;
        let revenue = revenue(quantity, unit_price, discount);
        let mut profit = gross_profit(revenue, quantity, cost);

        let weak_pairing = !(product_is_top && self.is_top_store(&store.id));
        if weak_pairing && rng.gen_bool(self.config.loss_flip_probability) {
            profit = -profit;
        }

        let customer = &self.customers[sampling::pick_index(rng, self.customers.len())];

        Sale {
            order_id: order_id(position),
            order_date: Some(order_date),
            customer_id: Some(customer.id.clone()),
            product_id: product.id.clone(),
            store_id: store.id.clone(),
            quantity,
            unit_price,
            discount,
            revenue,
            cost,
            profit,
            status: self.statuses.sample(rng),
        }
    }
}
