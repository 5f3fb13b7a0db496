use chrono::NaiveDate;
use thiserror::Error;

/// Reasons a [`GeneratorConfig`](crate::config::GeneratorConfig) is rejected before generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("'{field}' must be between 0 and 1, got {value}")]
    OutOfUnitRange { field: &'static str, value: f64 },
    #[error("'{field}' must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("'{field}' must be at most {limit}, got {value}")]
    AboveLimit {
        field: &'static str,
        value: f64,
        limit: f64,
    },
    #[error("'{field}' must not be zero")]
    Empty { field: &'static str },
    #[error("'{field}' range {start} ..= {end} is inverted")]
    InvertedRange {
        field: &'static str,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[error("'{field}' requests {requested} row(s) but only {available} are available")]
    TooManyRows {
        field: &'static str,
        requested: usize,
        available: usize,
    },
    #[error("none of the top cities {0:?} has a store")]
    NoTopStores(Vec<String>),
    #[error("top product percentile {percentile} selects no product out of {products}")]
    NoTopProducts { percentile: f64, products: usize },
}
