//! Output-side I/O helpers.
//!
//! Every file retail-synth writes goes through this module:
//!
//! - **Output directory**: must exist unless creation is requested.
//! - **Delimiter resolution**: comma by default; a tab delimiter switches the
//!   table extension to `.tsv`.
//! - **Writer construction**: buffered CSV writers with standard quoting.
//! - **Digests**: SHA-256 of written files for the run manifest.

use std::{
    fs::{self, File},
    io::BufWriter,
    path::Path,
};

use anyhow::{Context, Result, bail};
use csv::QuoteStyle;
use sha2::{Digest, Sha256};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

pub fn resolve_output_delimiter(provided: Option<u8>) -> u8 {
    provided.unwrap_or(DEFAULT_CSV_DELIMITER)
}

pub fn table_extension(delimiter: u8) -> &'static str {
    if delimiter == DEFAULT_TSV_DELIMITER {
        "tsv"
    } else {
        "csv"
    }
}

pub fn ensure_output_dir(path: &Path, create: bool) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        bail!("Output path {path:?} is not a directory");
    }
    if !create {
        bail!("Output directory {path:?} does not exist (pass --create-dir to create it)");
    }
    fs::create_dir_all(path).with_context(|| format!("Creating output directory {path:?}"))
}

pub fn open_csv_writer(path: &Path, delimiter: u8) -> Result<csv::Writer<BufWriter<File>>> {
    let file = File::create(path).with_context(|| format!("Creating output file {path:?}"))?;
    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Necessary)
        .double_quote(true);
    Ok(builder.from_writer(BufWriter::new(file)))
}

pub fn sha256_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Reading {path:?} for digest"))?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}
