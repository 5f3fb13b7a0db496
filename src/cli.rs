use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Generate a skewed, deliberately dirty retail dataset",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate stores, products, customers and sales tables
    Generate(GenerateArgs),
    /// Print or save the default generator configuration as YAML
    Config(ConfigArgs),
}

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Directory that receives the generated tables
    #[arg(short = 'o', long = "output-dir", default_value = "data")]
    pub output_dir: PathBuf,
    /// YAML configuration overriding the built-in defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Seed for the random generator
    #[arg(long)]
    pub seed: Option<u64>,
    /// Number of sales orders to simulate (before duplicates)
    #[arg(long)]
    pub orders: Option<usize>,
    /// Number of unique customers (before duplicates)
    #[arg(long)]
    pub customers: Option<usize>,
    /// Number of products in the catalog
    #[arg(long)]
    pub products: Option<usize>,
    /// Create the output directory when it does not exist
    #[arg(long = "create-dir")]
    pub create_dir: bool,
    /// Output delimiter (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Print a summary of the generated skew and defects
    #[arg(long)]
    pub summary: bool,
    /// Skip writing manifest.json
    #[arg(long = "no-manifest")]
    pub no_manifest: bool,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Destination YAML file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() || first == '"' || first == '\n' {
                return Err(format!("Delimiter {first:?} is not usable"));
            }
            Ok(first as u8)
        }
    }
}
