//! # Configuration
//!
//! Resolves what the checkout runs with: tax rate, customer age, catalog
//! and output format.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     till --age 21 --tax-rate 8.25 --json                               │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     TILL_TAX_RATE=8.25                                                 │
//! │     TILL_CUSTOMER_AGE=21                                               │
//! │     TILL_CATALOG=./catalog.toml                                        │
//! │     TILL_OUTPUT=json                                                   │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <path>, else TILL_CONFIG, else                            │
//! │     ~/.config/till/till.toml (Linux)                                   │
//! │     ~/Library/Application Support/com.till.till/till.toml (macOS)      │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     8.25% tax, customer aged 19, demo catalog, text output             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [checkout]
//! tax_rate = "8.25"        # percent; a bare number like 8.25 also works
//! customer_age = 21
//! catalog = "catalog.toml" # relative to this file
//! output = "text"          # text | json
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

use directories::ProjectDirs;
use till_core::validation::{validate_customer_age, validate_tax_rate};
use till_core::{Customer, TaxRate, ValidationError};

/// Env var naming an explicit config file.
pub const ENV_CONFIG: &str = "TILL_CONFIG";
pub const ENV_TAX_RATE: &str = "TILL_TAX_RATE";
pub const ENV_CUSTOMER_AGE: &str = "TILL_CUSTOMER_AGE";
pub const ENV_CATALOG: &str = "TILL_CATALOG";
pub const ENV_OUTPUT: &str = "TILL_OUTPUT";

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "till.toml";

/// 8.25%
pub const DEFAULT_TAX_RATE_BPS: u32 = 825;
pub const DEFAULT_CUSTOMER_AGE: u32 = 19;

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Output Format
// =============================================================================

/// How the receipt is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The plain console receipt.
    #[default]
    Text,
    /// The receipt as pretty-printed JSON, money in cents.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "plain" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::InvalidValue {
                key: "output".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// File Representation
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    checkout: CheckoutSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CheckoutSection {
    tax_rate: Option<RateValue>,
    customer_age: Option<u32>,
    catalog: Option<PathBuf>,
    output: Option<OutputFormat>,
}

/// `tax_rate = "8.25"` or `tax_rate = 8.25`.
///
/// Both forms go through the exact `TaxRate` parser; a number is first
/// printed in its shortest round-trip form, so `8.875` reads as `"8.875"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RateValue {
    Text(String),
    Number(f64),
}

impl RateValue {
    fn to_tax_rate(&self) -> ConfigResult<TaxRate> {
        let text = match self {
            RateValue::Text(text) => text.clone(),
            RateValue::Number(pct) => pct.to_string(),
        };
        text.parse().map_err(|_| ConfigError::InvalidValue {
            key: "checkout.tax_rate".to_string(),
            value: text,
        })
    }
}

// =============================================================================
// Command-Line Overrides
// =============================================================================

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub tax_rate: Option<TaxRate>,
    pub customer_age: Option<u32>,
    pub catalog: Option<PathBuf>,
    pub json: bool,
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// The fully resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TillConfig {
    pub tax_rate: TaxRate,
    pub customer_age: u32,
    /// `None` means the built-in demo catalog.
    pub catalog_path: Option<PathBuf>,
    pub output: OutputFormat,
}

impl Default for TillConfig {
    fn default() -> Self {
        TillConfig {
            tax_rate: TaxRate::from_bps(DEFAULT_TAX_RATE_BPS),
            customer_age: DEFAULT_CUSTOMER_AGE,
            catalog_path: None,
            output: OutputFormat::Text,
        }
    }
}

impl TillConfig {
    /// Resolves all four layers from the real environment and validates.
    ///
    /// `explicit_path` is the `--config` flag.
    pub fn load(explicit_path: Option<&Path>, overrides: &Overrides) -> ConfigResult<Self> {
        let mut config = TillConfig::default();

        let env_path = std::env::var_os(ENV_CONFIG).map(PathBuf::from);
        match explicit_path.map(Path::to_path_buf).or(env_path) {
            Some(path) => config.merge_file(&path)?,
            None => {
                if let Some(path) = default_config_path().filter(|p| p.is_file()) {
                    config.merge_file(&path)?;
                } else {
                    debug!("No config file found, using defaults");
                }
            }
        }

        config.apply_env()?;
        config.apply_overrides(overrides);
        config.validate()?;

        info!(
            tax_rate = %config.tax_rate,
            customer_age = config.customer_age,
            catalog = ?config.catalog_path,
            output = %config.output,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Defaults overlaid with a TOML document.
    ///
    /// A relative `catalog` path is kept as written.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let mut config = TillConfig::default();
        config.merge_toml(text, Path::new("<inline>"), None)?;
        Ok(config)
    }

    /// Overlays a config file. A relative `catalog` is resolved against the
    /// file's directory.
    pub fn merge_file(&mut self, path: &Path) -> ConfigResult<()> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(?path, "Reading config file");
        self.merge_toml(&text, path, path.parent())
    }

    fn merge_toml(&mut self, text: &str, path: &Path, base_dir: Option<&Path>) -> ConfigResult<()> {
        let file: FileConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let section = file.checkout;

        if let Some(rate) = &section.tax_rate {
            self.tax_rate = rate.to_tax_rate()?;
        }
        if let Some(age) = section.customer_age {
            self.customer_age = age;
        }
        if let Some(catalog) = section.catalog {
            self.catalog_path = Some(match base_dir {
                Some(dir) if catalog.is_relative() => dir.join(catalog),
                _ => catalog,
            });
        }
        if let Some(output) = section.output {
            self.output = output;
        }

        Ok(())
    }

    /// Applies `TILL_*` variables from the process environment.
    pub fn apply_env(&mut self) -> ConfigResult<()> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Applies `TILL_*` variables through `lookup`.
    ///
    /// Empty values are ignored; unparseable values are errors.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let invalid = |key: &str, value: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        if let Some(value) = get(ENV_TAX_RATE) {
            self.tax_rate = value.parse().map_err(|_| invalid(ENV_TAX_RATE, &value))?;
        }
        if let Some(value) = get(ENV_CUSTOMER_AGE) {
            self.customer_age = value
                .trim()
                .parse()
                .map_err(|_| invalid(ENV_CUSTOMER_AGE, &value))?;
        }
        if let Some(value) = get(ENV_CATALOG) {
            self.catalog_path = Some(PathBuf::from(value));
        }
        if let Some(value) = get(ENV_OUTPUT) {
            self.output = value.parse().map_err(|_| invalid(ENV_OUTPUT, &value))?;
        }

        Ok(())
    }

    /// Applies command-line flags.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(rate) = overrides.tax_rate {
            self.tax_rate = rate;
        }
        if let Some(age) = overrides.customer_age {
            self.customer_age = age;
        }
        if let Some(catalog) = &overrides.catalog {
            self.catalog_path = Some(catalog.clone());
        }
        if overrides.json {
            self.output = OutputFormat::Json;
        }
    }

    /// Checks the resolved values: tax rate at most 100%, age at most 150.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_tax_rate(self.tax_rate)?;
        validate_customer_age(self.customer_age)?;
        Ok(())
    }

    pub fn customer(&self) -> Customer {
        Customer::new(self.customer_age)
    }
}

/// `till.toml` inside the platform config directory.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "till", "till").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
