//! Data-quality defects applied to the finished sales table.

use std::collections::HashSet;

use log::debug;
use rand::Rng;

use crate::{
    config::DefectConfig,
    model::{Sale, Store},
    sampling,
};

/// What the defect pass actually changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefectReport {
    pub null_customers: usize,
    pub null_dates: usize,
    pub duplicated_rows: usize,
    pub penalized_rows: usize,
}

/// Blanks customers and dates on disjoint rows, appends duplicate rows, then
/// scales profit on every row that references an inactive store.
pub fn inject<R: Rng + ?Sized>(
    sales: &mut Vec<Sale>,
    stores: &[Store],
    defects: &DefectConfig,
    rng: &mut R,
) -> DefectReport {
    let (null_customers, null_dates) = null_out(
        sales,
        defects.null_customer_rows,
        defects.null_date_rows,
        rng,
    );
    let duplicated_rows = append_duplicates(sales, defects.duplicate_sale_rows, rng);

    let inactive = stores
        .iter()
        .filter(|store| !store.is_active())
        .map(|store| store.id.as_str())
        .collect::<HashSet<_>>();
    let penalized_rows =
        apply_inactive_penalty(sales, &inactive, defects.inactive_profit_factor);

    let report = DefectReport {
        null_customers,
        null_dates,
        duplicated_rows,
        penalized_rows,
    };
    debug!("Injected defects: {report:?}");
    report
}

/// Returns how many customer and date cells were cleared.
pub fn null_out<R: Rng + ?Sized>(
    sales: &mut [Sale],
    customer_rows: usize,
    date_rows: usize,
    rng: &mut R,
) -> (usize, usize) {
    let picked = sampling::pick_subset(rng, sales.len(), customer_rows.saturating_add(date_rows));
    let (customers, dates) = picked.split_at(customer_rows.min(picked.len()));
    for &idx in customers {
        sales[idx].customer_id = None;
    }
    for &idx in dates {
        sales[idx].order_date = None;
    }
    (customers.len(), dates.len())
}

pub fn append_duplicates<R: Rng + ?Sized>(sales: &mut Vec<Sale>, rows: usize, rng: &mut R) -> usize {
    let copies = sampling::pick_subset(rng, sales.len(), rows)
        .into_iter()
        .map(|idx| sales[idx].clone())
        .collect::<Vec<_>>();
    let appended = copies.len();
    sales.extend(copies);
    appended
}

pub fn apply_inactive_penalty(sales: &mut [Sale], inactive: &HashSet<&str>, factor: f64) -> usize {
    let mut penalized = 0;
    for sale in sales.iter_mut().filter(|s| inactive.contains(s.store_id.as_str())) {
        sale.profit *= factor;
        penalized += 1;
    }
    penalized
}
