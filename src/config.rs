//! Generation parameters.
//!
//! Every knob of the pipeline lives in [`GeneratorConfig`]. The defaults are
//! the fixed constants of the reference dataset, so running with no config
//! file reproduces it exactly. A YAML file may override any subset of fields;
//! missing fields fall back to the defaults through `#[serde(default)]`.

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, stores};

pub const DEFAULT_SEED: u64 = 42;
/// Upper bound for either Poisson quantity mean.
pub const MAX_MEAN_QUANTITY: f64 = 1_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub seed: u64,
    /// First calendar day an order can fall on.
    pub start_date: NaiveDate,
    /// Last calendar day an order can fall on (inclusive).
    pub end_date: NaiveDate,
    pub customers: usize,
    pub products: usize,
    pub orders: usize,
    /// Probability that an order is drawn from the top-product set.
    pub top_product_share: f64,
    /// Probability that an order is drawn from the top-store set.
    pub top_store_share: f64,
    /// Fraction of the catalog, ranked by list price, that forms the top-product set.
    pub top_product_percentile: f64,
    /// Orders up to and including this year use the growth quantity mean.
    pub growth_cutoff_year: i32,
    pub growth_mean_quantity: f64,
    pub decline_mean_quantity: f64,
    /// Chance of flipping the profit sign when the store or product is not top.
    pub loss_flip_probability: f64,
    pub loss_maker_count: usize,
    pub loss_maker_cost_factor: f64,
    pub store_open_start: NaiveDate,
    pub store_open_end: NaiveDate,
    pub top_cities: Vec<String>,
    pub inactive_cities: Vec<String>,
    pub defects: DefectConfig,
}

/// Counts and factors for the dirt injected after generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefectConfig {
    pub duplicate_customers: usize,
    pub null_customer_rows: usize,
    pub null_date_rows: usize,
    pub duplicate_sale_rows: usize,
    pub inactive_profit_factor: f64,
}

impl Default for DefectConfig {
    fn default() -> Self {
        Self {
            duplicate_customers: 25,
            null_customer_rows: 60,
            null_date_rows: 50,
            duplicate_sale_rows: 150,
            inactive_profit_factor: 0.6,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            start_date: ymd(2022, 1, 1),
            end_date: ymd(2025, 12, 31),
            customers: 800,
            products: 120,
            orders: 18_000,
            top_product_share: 0.65,
            top_store_share: 0.70,
            top_product_percentile: 0.15,
            growth_cutoff_year: 2023,
            growth_mean_quantity: 4.0,
            decline_mean_quantity: 1.0,
            loss_flip_probability: 0.35,
            loss_maker_count: 20,
            loss_maker_cost_factor: 1.5,
            store_open_start: ymd(2010, 1, 1),
            store_open_end: ymd(2020, 1, 1),
            top_cities: to_strings(&["New York", "Los Angeles", "San Jose", "Chicago", "Houston"]),
            inactive_cities: to_strings(&["Detroit", "Cleveland", "Newark"]),
            defects: DefectConfig::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Opening config file {path:?}"))?;
        let reader = BufReader::new(file);
        let config: GeneratorConfig =
            serde_yaml::from_reader(reader).context("Parsing config YAML")?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).with_context(|| format!("Creating config file {path:?}"))?;
        serde_yaml::to_writer(file, self).context("Writing config YAML")
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Serializing config to YAML string")
    }

    /// Number of products that make up the top-product set.
    pub fn top_product_count(&self) -> usize {
        (self.products as f64 * self.top_product_percentile).floor() as usize
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("top_product_share", self.top_product_share),
            ("top_store_share", self.top_store_share),
            ("top_product_percentile", self.top_product_percentile),
            ("loss_flip_probability", self.loss_flip_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfUnitRange { field, value });
            }
        }
        for (field, value) in [
            ("growth_mean_quantity", self.growth_mean_quantity),
            ("decline_mean_quantity", self.decline_mean_quantity),
            ("loss_maker_cost_factor", self.loss_maker_cost_factor),
            (
                "defects.inactive_profit_factor",
                self.defects.inactive_profit_factor,
            ),
        ] {
            // NaN fails this comparison too
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        for (field, value) in [
            ("growth_mean_quantity", self.growth_mean_quantity),
            ("decline_mean_quantity", self.decline_mean_quantity),
        ] {
            if value > MAX_MEAN_QUANTITY {
                return Err(ConfigError::AboveLimit {
                    field,
                    value,
                    limit: MAX_MEAN_QUANTITY,
                });
            }
        }
        for (field, count) in [
            ("customers", self.customers),
            ("products", self.products),
            ("orders", self.orders),
        ] {
            if count == 0 {
                return Err(ConfigError::Empty { field });
            }
        }
        for (field, start, end) in [
            ("start_date..end_date", self.start_date, self.end_date),
            (
                "store_open_start..store_open_end",
                self.store_open_start,
                self.store_open_end,
            ),
        ] {
            if start > end {
                return Err(ConfigError::InvertedRange { field, start, end });
            }
        }

        check_rows("loss_maker_count", self.loss_maker_count, self.products)?;
        check_rows(
            "defects.duplicate_customers",
            self.defects.duplicate_customers,
            self.customers,
        )?;
        let null_rows = self
            .defects
            .null_customer_rows
            .checked_add(self.defects.null_date_rows)
            .unwrap_or(usize::MAX);
        check_rows(
            "defects.null_customer_rows + defects.null_date_rows",
            null_rows,
            self.orders,
        )?;
        check_rows(
            "defects.duplicate_sale_rows",
            self.defects.duplicate_sale_rows,
            self.orders,
        )?;

        let has_top_store = stores::ROSTER
            .iter()
            .any(|entry| self.top_cities.iter().any(|city| city == entry.city));
        if !has_top_store {
            return Err(ConfigError::NoTopStores(self.top_cities.clone()));
        }
        if self.top_product_count() == 0 {
            return Err(ConfigError::NoTopProducts {
                percentile: self.top_product_percentile,
                products: self.products,
            });
        }
        Ok(())
    }
}

fn check_rows(field: &'static str, requested: usize, available: usize) -> Result<(), ConfigError> {
    if requested > available {
        Err(ConfigError::TooManyRows {
            field,
            requested,
            available,
        })
    } else {
        Ok(())
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let config = GeneratorConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.orders, 18_000);
        assert_eq!(config.customers, 800);
        assert_eq!(config.products, 120);
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
        assert_eq!(config.end_date, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        assert_eq!(config.top_product_count(), 18);
        assert_eq!(config.defects.duplicate_sale_rows, 150);
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let yaml = "seed: 7\norders: 500\ndefects:\n  null_date_rows: 5\n";
        let config: GeneratorConfig = serde_yaml::from_str(yaml).expect("parse yaml");
        assert_eq!(config.seed, 7);
        assert_eq!(config.orders, 500);
        assert_eq!(config.defects.null_date_rows, 5);
        assert_eq!(config.defects.null_customer_rows, 60);
        assert_eq!(config.products, 120);
        assert_eq!(config.top_cities.len(), 5);
    }

    #[test]
    fn yaml_string_parses_back_to_same_config() {
        let config = GeneratorConfig::default();
        let yaml = config.to_yaml_string().expect("serialize");
        assert!(yaml.contains("start_date: 2022-01-01"));
        let parsed: GeneratorConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn validate_rejects_share_outside_unit_range() {
        let config = GeneratorConfig {
            top_store_share: 1.5,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::OutOfUnitRange {
                field: "top_store_share",
                value: 1.5
            })
        );
    }

    #[test]
    fn validate_rejects_inverted_dates() {
        let config = GeneratorConfig {
            start_date: ymd(2026, 1, 1),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedRange { .. })
        ));
    }

    #[test]
    fn validate_rejects_more_nulls_than_orders() {
        let mut config = GeneratorConfig {
            orders: 100,
            ..Default::default()
        };
        config.defects.duplicate_sale_rows = 10;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManyRows { requested: 110, available: 100, .. })
        ));
    }

    #[test]
    fn validate_rejects_null_counts_that_overflow() {
        let yaml = "defects:\n  null_customer_rows: 18446744073709551615\n  null_date_rows: 1\n";
        let config: GeneratorConfig = serde_yaml::from_str(yaml).expect("parse yaml");
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManyRows {
                field: "defects.null_customer_rows + defects.null_date_rows",
                requested: usize::MAX,
                available: 18_000,
            })
        );
    }

    #[test]
    fn validate_rejects_unbounded_quantity_means() {
        let config = GeneratorConfig {
            growth_mean_quantity: 1e30,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::AboveLimit { field: "growth_mean_quantity", .. })
        ));

        let config = GeneratorConfig {
            decline_mean_quantity: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::AboveLimit { field: "decline_mean_quantity", .. })
        ));
    }

    #[test]
    fn validate_rejects_unknown_top_cities_and_empty_top_products() {
        let config = GeneratorConfig {
            top_cities: vec!["Atlantis".to_string()],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoTopStores(_))));

        let config = GeneratorConfig {
            products: 5,
            loss_maker_count: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NoTopProducts { products: 5, .. })
        ));
    }
}
