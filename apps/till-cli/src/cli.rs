//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;
use till_core::TaxRate;

use crate::config::Overrides;

#[derive(Debug, Parser)]
#[command(name = "till")]
#[command(about = "Ring up a basket and print the receipt.")]
#[command(version)]
pub struct CommandLine {
    /// Config file (default: TILL_CONFIG, then the platform config dir)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Catalog TOML file; the demo basket is used when omitted
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Customer age in years
    #[arg(short, long, value_name = "YEARS")]
    pub age: Option<u32>,

    /// Tax rate in percent, e.g. 8.25
    #[arg(short, long, value_name = "PERCENT")]
    pub tax_rate: Option<TaxRate>,

    /// Print the receipt as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            tax_rate: self.tax_rate,
            customer_age: self.age,
            catalog: self.catalog.clone(),
            json: self.json,
        }
    }
}
