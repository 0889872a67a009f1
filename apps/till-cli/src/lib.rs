//! # Till CLI Library
//!
//! Everything the `till` binary does, kept in a library so it can be tested
//! without spawning a process.
//!
//! ## Module Organization
//! ```text
//! till_cli/
//! ├── lib.rs          ◄─── You are here (logging, run)
//! ├── cli.rs          ◄─── clap arguments
//! ├── config.rs       ◄─── defaults, till.toml, TILL_* env, flags
//! ├── catalog.rs      ◄─── demo basket and catalog files
//! └── error.rs        ◄─── CliError
//! ```
//!
//! ## Run Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize Logging     tracing-subscriber → stderr, RUST_LOG        │
//! │  2. Resolve Config         TillConfig::load                             │
//! │  3. Assemble Inputs        catalog items, Customer, TaxRate             │
//! │  4. Checkout               till_core::checkout (pure)                   │
//! │  5. Print Receipt          text or JSON → stdout                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! stdout carries only the receipt; logs never mix into it.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;

use std::io::{self, Write};

use tracing::info;
use tracing_subscriber::EnvFilter;

use till_core::{checkout, Receipt};

use crate::cli::CommandLine;
use crate::config::{OutputFormat, TillConfig};
use crate::error::CliResult;

/// Runs one checkout as described by the command line, printing to stdout.
pub fn run(cli: &CommandLine) -> CliResult<()> {
    let config = TillConfig::load(cli.config.as_deref(), &cli.overrides())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with_config(&config, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Runs one checkout for an already resolved config, writing to `out`.
pub fn run_with_config<W: Write>(config: &TillConfig, out: &mut W) -> CliResult<Receipt> {
    let items = catalog::resolve_catalog(config.catalog_path.as_deref())?;
    let customer = config.customer();

    let receipt = checkout(&items, config.tax_rate, &customer);
    info!(
        purchased = receipt.purchased().count(),
        rejected = receipt.rejected().count(),
        total = %receipt.total,
        "Receipt ready"
    );

    match config.output {
        OutputFormat::Text => receipt.write_to(out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &receipt)?;
            writeln!(out)?;
        }
    }

    Ok(receipt)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every purchase decision
/// - `RUST_LOG=till_core=trace` - Trace the core crate only
/// - Default: warnings only, so a plain run prints nothing but the receipt
///
/// Logs go to stderr.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}
