use anyhow::{Context, Result};
use log::{debug, info};

use crate::{
    cli::GenerateArgs, config::GeneratorConfig, dataset, export, io_utils,
    summary::GenerationSummary,
};

pub fn execute(args: &GenerateArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let delimiter = io_utils::resolve_output_delimiter(args.delimiter);
    io_utils::ensure_output_dir(&args.output_dir, args.create_dir)?;
    debug!(
        "Seed {} | {} order(s) from {} to {}",
        config.seed, config.orders, config.start_date, config.end_date
    );

    let dataset = dataset::generate(&config)?;
    let tables = export::write_dataset(&dataset, &args.output_dir, delimiter)
        .with_context(|| format!("Writing tables to {:?}", args.output_dir))?;
    if !args.no_manifest {
        export::write_manifest(&args.output_dir, &config, &tables)?;
    }

    if args.summary {
        print!("{}", GenerationSummary::from_dataset(&dataset).render());
    }
    info!(
        "Retail dataset with skew and injected dirt written to {:?} ({} table(s))",
        args.output_dir,
        tables.len()
    );
    Ok(())
}

/// Defaults, then the config file, then individual flags.
pub fn resolve_config(args: &GenerateArgs) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("Loading config from {path:?}"))?,
        None => GeneratorConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(orders) = args.orders {
        config.orders = orders;
    }
    if let Some(customers) = args.customers {
        config.customers = customers;
    }
    if let Some(products) = args.products {
        config.products = products;
    }
    Ok(config)
}
