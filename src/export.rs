//! Writes a [`Dataset`] as four delimited tables plus an optional manifest.
//!
//! Nulls become empty fields, floats use the shortest round-trip decimal
//! form and dates are rendered as `YYYY-MM-DD`.

use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{debug, info};
use serde::Serialize;

use crate::{
    config::GeneratorConfig,
    dataset::Dataset,
    io_utils,
    model::{Customer, Product, Sale, Store},
};

pub const STORES_TABLE: &str = "stores";
pub const PRODUCTS_TABLE: &str = "products";
pub const CUSTOMERS_TABLE: &str = "customers";
pub const SALES_TABLE: &str = "sales_transactions";
pub const MANIFEST_FILE: &str = "manifest.json";

/// A record that knows its table header and how to render itself as fields.
pub trait TableRow {
    const HEADERS: &'static [&'static str];

    fn fields(&self) -> Vec<String>;
}

impl TableRow for Store {
    const HEADERS: &'static [&'static str] = &[
        "Store_Name",
        "City",
        "State",
        "Region",
        "Store_ID",
        "Store_Status",
        "Open_Date",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.city.clone(),
            self.state.clone(),
            self.region.to_string(),
            self.id.clone(),
            self.status.to_string(),
            format_date(Some(self.open_date)),
        ]
    }
}

impl TableRow for Product {
    const HEADERS: &'static [&'static str] = &[
        "Product_ID",
        "Product_Name",
        "Category",
        "Standard_Cost",
        "List_Price",
        "Product_Status",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.category.to_string(),
            format_float(self.standard_cost),
            format_float(self.list_price),
            self.status.to_string(),
        ]
    }
}

impl TableRow for Customer {
    const HEADERS: &'static [&'static str] = &[
        "Customer_ID",
        "Full_Name",
        "Segment",
        "City",
        "State",
        "Country",
        "Status",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.full_name.clone(),
            self.segment.to_string(),
            self.city.clone(),
            self.state.clone(),
            self.country.clone(),
            self.status.to_string(),
        ]
    }
}

impl TableRow for Sale {
    const HEADERS: &'static [&'static str] = &[
        "Order_ID",
        "Order_Date",
        "Customer_ID",
        "Product_ID",
        "Store_ID",
        "Quantity",
        "Unit_Price",
        "Discount",
        "Revenue",
        "Cost",
        "Profit",
        "Order_Status",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.order_id.clone(),
            format_date(self.order_date),
            self.customer_id.clone().unwrap_or_default(),
            self.product_id.clone(),
            self.store_id.clone(),
            self.quantity.to_string(),
            format_float(self.unit_price),
            self.discount.map(format_float).unwrap_or_default(),
            format_float(self.revenue),
            format_float(self.cost),
            format_float(self.profit),
            self.status.to_string(),
        ]
    }
}

pub fn format_float(value: f64) -> String {
    value.to_string()
}

pub fn format_date(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExportedTable {
    pub table: String,
    pub file: String,
    pub rows: usize,
    pub sha256: String,
}

#[derive(Debug, Serialize)]
struct Manifest<'a> {
    generator: &'static str,
    version: &'static str,
    config: &'a GeneratorConfig,
    tables: &'a [ExportedTable],
}

pub fn table_path(dir: &Path, table: &str, delimiter: u8) -> PathBuf {
    dir.join(format!("{table}.{}", io_utils::table_extension(delimiter)))
}

/// Writes the four tables into `dir`, returning one entry per file.
pub fn write_dataset(dataset: &Dataset, dir: &Path, delimiter: u8) -> Result<Vec<ExportedTable>> {
    Ok(vec![
        write_table(dir, SALES_TABLE, delimiter, &dataset.sales)?,
        write_table(dir, CUSTOMERS_TABLE, delimiter, &dataset.customers)?,
        write_table(dir, PRODUCTS_TABLE, delimiter, &dataset.products)?,
        write_table(dir, STORES_TABLE, delimiter, &dataset.stores)?,
    ])
}

pub fn write_table<T: TableRow>(
    dir: &Path,
    table: &str,
    delimiter: u8,
    rows: &[T],
) -> Result<ExportedTable> {
    let path = table_path(dir, table, delimiter);
    {
        let mut writer = io_utils::open_csv_writer(&path, delimiter)?;
        writer
            .write_record(T::HEADERS)
            .with_context(|| format!("Writing header to {path:?}"))?;
        for (idx, row) in rows.iter().enumerate() {
            writer
                .write_record(row.fields())
                .with_context(|| format!("Writing row {} to {path:?}", idx + 2))?;
        }
        writer
            .flush()
            .with_context(|| format!("Flushing {path:?}"))?;
    }
    let sha256 = io_utils::sha256_file(&path)?;
    debug!("Wrote {} row(s) to {path:?} (sha256 {sha256})", rows.len());
    Ok(ExportedTable {
        table: table.to_string(),
        file: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        rows: rows.len(),
        sha256,
    })
}

pub fn write_manifest(
    dir: &Path,
    config: &GeneratorConfig,
    tables: &[ExportedTable],
) -> Result<PathBuf> {
    let path = dir.join(MANIFEST_FILE);
    let manifest = Manifest {
        generator: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        config,
        tables,
    };
    let file = File::create(&path).with_context(|| format!("Creating manifest {path:?}"))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &manifest)
        .with_context(|| format!("Writing manifest {path:?}"))?;
    info!("Manifest written to {path:?}");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderStatus;

    fn sample_sale() -> Sale {
        Sale {
            order_id: "O000007".to_string(),
            order_date: None,
            customer_id: None,
            product_id: "P0003".to_string(),
            store_id: "S002".to_string(),
            quantity: 3,
            unit_price: 1250.5,
            discount: None,
            revenue: 3751.5,
            cost: 900.0,
            profit: 1051.5,
            status: OrderStatus::Cancelled,
        }
    }

    #[test]
    fn nulls_render_as_empty_fields() {
        let fields = sample_sale().fields();
        assert_eq!(fields.len(), Sale::HEADERS.len());
        assert_eq!(fields[1], "");
        assert_eq!(fields[2], "");
        assert_eq!(fields[7], "");
        assert_eq!(fields[6], "1250.5");
        assert_eq!(fields[9], "900");
        assert_eq!(fields[11], "Cancelled");
    }

    #[test]
    fn write_table_emits_header_and_digest() {
        let temp = tempfile::tempdir().unwrap();
        let mut with_discount = sample_sale();
        with_discount.discount = Some(0.1);
        with_discount.order_date = NaiveDate::from_ymd_opt(2024, 2, 29);
        let exported =
            write_table(temp.path(), SALES_TABLE, b',', &[sample_sale(), with_discount]).unwrap();

        assert_eq!(exported.file, "sales_transactions.csv");
        assert_eq!(exported.rows, 2);
        assert_eq!(exported.sha256.len(), 64);

        let contents = std::fs::read_to_string(temp.path().join(&exported.file)).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Order_ID,Order_Date,Customer_ID,Product_ID,Store_ID,Quantity,Unit_Price,Discount,Revenue,Cost,Profit,Order_Status"
        );
        assert_eq!(
            lines.next().unwrap(),
            "O000007,,,P0003,S002,3,1250.5,,3751.5,900,1051.5,Cancelled"
        );
        assert!(lines.next().unwrap().contains(",2024-02-29,"));
    }

    #[test]
    fn tab_delimited_tables_use_tsv_extension() {
        let temp = tempfile::tempdir().unwrap();
        let exported = write_table(temp.path(), SALES_TABLE, b'\t', &[sample_sale()]).unwrap();
        assert_eq!(exported.file, "sales_transactions.tsv");
    }
}
