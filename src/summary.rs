//! Post-run report describing the skew and dirt that ended up in a dataset.

use std::collections::HashSet;

use itertools::Itertools;

use crate::{dataset::Dataset, table};

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSummary {
    pub stores: usize,
    pub products: usize,
    pub customer_rows: usize,
    pub sale_rows: usize,
    pub repeated_customer_ids: usize,
    pub repeated_order_ids: usize,
    pub category_labels: usize,
    pub top_product_share: f64,
    pub top_store_share: f64,
    pub null_customer_refs: usize,
    pub null_order_dates: usize,
    pub null_discounts: usize,
    pub loss_rows: usize,
    pub inactive_store_rows: usize,
}

impl GenerationSummary {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let sales = &dataset.sales;
        let top_products = dataset
            .top_product_ids
            .iter()
            .map(String::as_str)
            .collect::<HashSet<_>>();
        let top_stores = dataset
            .top_store_ids
            .iter()
            .map(String::as_str)
            .collect::<HashSet<_>>();
        let share = |hits: usize| {
            if sales.is_empty() {
                0.0
            } else {
                hits as f64 / sales.len() as f64
            }
        };

        Self {
            stores: dataset.stores.len(),
            products: dataset.products.len(),
            customer_rows: dataset.customers.len(),
            sale_rows: sales.len(),
            repeated_customer_ids: repeated(dataset.customers.iter().map(|c| c.id.as_str())),
            repeated_order_ids: repeated(sales.iter().map(|s| s.order_id.as_str())),
            category_labels: dataset.products.iter().map(|p| p.category).unique().count(),
            top_product_share: share(
                sales
                    .iter()
                    .filter(|s| top_products.contains(s.product_id.as_str()))
                    .count(),
            ),
            top_store_share: share(
                sales
                    .iter()
                    .filter(|s| top_stores.contains(s.store_id.as_str()))
                    .count(),
            ),
            null_customer_refs: sales.iter().filter(|s| s.customer_id.is_none()).count(),
            null_order_dates: sales.iter().filter(|s| s.order_date.is_none()).count(),
            null_discounts: sales.iter().filter(|s| s.discount.is_none()).count(),
            loss_rows: sales.iter().filter(|s| s.profit < 0.0).count(),
            inactive_store_rows: dataset.defects.penalized_rows,
        }
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        let percent = |value: f64| format!("{:.2}%", value * 100.0);
        [
            ("stores", self.stores.to_string()),
            ("products", self.products.to_string()),
            ("customer rows", self.customer_rows.to_string()),
            ("sale rows", self.sale_rows.to_string()),
            ("repeated customer ids", self.repeated_customer_ids.to_string()),
            ("repeated order ids", self.repeated_order_ids.to_string()),
            ("category labels", self.category_labels.to_string()),
            ("top product share", percent(self.top_product_share)),
            ("top store share", percent(self.top_store_share)),
            ("null customer refs", self.null_customer_refs.to_string()),
            ("null order dates", self.null_order_dates.to_string()),
            ("null discounts", self.null_discounts.to_string()),
            ("loss rows", self.loss_rows.to_string()),
            ("inactive store rows", self.inactive_store_rows.to_string()),
        ]
        .into_iter()
        .map(|(metric, value)| vec![metric.to_string(), value])
        .collect()
    }

    pub fn render(&self) -> String {
        let headers = vec!["metric".to_string(), "value".to_string()];
        table::render_table(&headers, &self.rows())
    }
}

/// Number of distinct values that occur more than once.
fn repeated<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    values.counts().into_values().filter(|n| *n > 1).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::GeneratorConfig, dataset};

    #[test]
    fn summary_reflects_injected_defects() {
        let config = GeneratorConfig {
            orders: 2_000,
            ..Default::default()
        };
        let dataset = dataset::generate(&config).unwrap();
        let summary = GenerationSummary::from_dataset(&dataset);

        assert_eq!(summary.stores, 25);
        assert_eq!(summary.sale_rows, 2_150);
        assert_eq!(summary.repeated_customer_ids, 25);
        assert_eq!(summary.repeated_order_ids, 150);
        assert!(summary.null_customer_refs >= 60);
        assert!(summary.null_order_dates >= 50);
        assert!(summary.loss_rows > 0);
        assert!(summary.top_product_share > 0.6);
    }

    #[test]
    fn render_lists_every_metric() {
        let config = GeneratorConfig {
            orders: 300,
            ..Default::default()
        };
        let summary = GenerationSummary::from_dataset(&dataset::generate(&config).unwrap());
        let rendered = summary.render();
        assert!(rendered.starts_with("metric"));
        assert_eq!(rendered.lines().count(), 2 + summary.rows().len());
        assert!(rendered.contains("top product share"));
    }
}
