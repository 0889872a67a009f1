//! # CLI Error Type
//!
//! Unified error type for the `till` binary.
//!
//! ## Error Flow
//! ```text
//! ConfigError  ──┐
//! CatalogError ──┼──► CliError ──► main() prints it to stderr, exit code 1
//! io::Error    ──┤
//! serde_json   ──┘
//! ```
//!
//! Core errors arrive wrapped: a bad catalog price is a `CatalogError`
//! carrying the `CoreError` as its source.
//!
//! A rejected purchase is not in this list: it is printed on the receipt
//! and the run still succeeds.

use std::io;

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Failed to write receipt: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to serialize receipt: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
