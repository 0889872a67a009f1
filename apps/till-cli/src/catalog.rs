//! # Catalog Loading
//!
//! Assembles the list of items to ring up, either the built-in demo basket
//! or a TOML catalog file.
//!
//! ## Catalog File Format
//! ```toml
//! [[item]]
//! kind = "food"            # not taxable
//! name = "Bananas"
//! price = "1.25"
//!
//! [[item]]
//! kind = "good"            # taxable
//! name = "Candy"
//! price = "2.50"
//!
//! [[item]]
//! kind = "beer"            # fixed: Beer, 4.95, taxable, minimum age 21
//!
//! [[item]]
//! kind = "custom"
//! name = "Wine"
//! price = "12.00"
//! taxable = true
//! restrictions = [{ type = "minimum_age", age = 21 }]
//! ```
//!
//! Items keep file order, and so do their restrictions. Restrictions listed
//! on a `beer` entry are appended after its built-in age check.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use till_core::{AgeRestriction, CoreError, Item, Money, Restriction, ValidationError};

/// The basket rung up when no catalog is configured.
const DEMO_CATALOG: &str = include_str!("../demo_catalog.toml");

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    /// `index` counts `[[item]]` entries from 1.
    #[error("Item #{index}: {source}")]
    InvalidItem {
        index: usize,
        #[source]
        source: CoreError,
    },
}

pub type CatalogResult<T> = Result<T, CatalogError>;

// =============================================================================
// File Representation
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default, rename = "item")]
    items: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ItemKind {
    Food,
    Good,
    Beer,
    Custom,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogEntry {
    kind: ItemKind,
    name: Option<String>,
    price: Option<PriceValue>,
    taxable: Option<bool>,
    #[serde(default)]
    restrictions: Vec<RestrictionEntry>,
}

/// `price = "4.95"` or `price = 4.95`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PriceValue {
    Text(String),
    Number(f64),
}

impl PriceValue {
    fn to_money(&self) -> Result<Money, CoreError> {
        // f64 Display is the shortest round-trip form, so 4.95 prints as
        // "4.95" and goes through the same exact parser as text.
        let text = match self {
            PriceValue::Text(text) => text.clone(),
            PriceValue::Number(n) => n.to_string(),
        };
        text.parse()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RestrictionEntry {
    MinimumAge { age: u32 },
}

impl RestrictionEntry {
    fn build(&self) -> Arc<dyn Restriction> {
        match self {
            RestrictionEntry::MinimumAge { age } => Arc::new(AgeRestriction::new(*age)),
        }
    }
}

impl CatalogEntry {
    fn into_item(self, index: usize) -> CatalogResult<Item> {
        let invalid = |source: CoreError| CatalogError::InvalidItem { index, source };
        let required = |field: &str| {
            invalid(
                ValidationError::Required {
                    field: field.to_string(),
                }
                .into(),
            )
        };
        let not_allowed = |field: &str, reason: &str| {
            invalid(
                ValidationError::NotAllowed {
                    field: field.to_string(),
                    reason: reason.to_string(),
                }
                .into(),
            )
        };

        let item = if self.kind == ItemKind::Beer {
            let fixed = [
                ("name", self.name.is_some()),
                ("price", self.price.is_some()),
                ("taxable", self.taxable.is_some()),
            ];
            if let Some(&(field, _)) = fixed.iter().find(|(_, set)| *set) {
                return Err(not_allowed(field, "beer is always Beer, 4.95, taxable"));
            }
            Item::beer()
        } else {
            let name = self.name.ok_or_else(|| required("name"))?;
            let price = self
                .price
                .as_ref()
                .ok_or_else(|| required("price"))?
                .to_money()
                .map_err(&invalid)?;

            let built = match self.kind {
                ItemKind::Food if self.taxable.is_none() => Item::food(name, price),
                ItemKind::Good if self.taxable.is_none() => Item::good(name, price),
                ItemKind::Custom => Item::new(name, price, self.taxable.unwrap_or(false)),
                _ => {
                    return Err(not_allowed(
                        "taxable",
                        "only custom items choose their tax status",
                    ))
                }
            };
            built.map_err(|e| invalid(e.into()))?
        };

        Ok(self
            .restrictions
            .iter()
            .fold(item, |item, entry| item.with_shared_restriction(entry.build())))
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Bananas, Cereal, Candy and a Beer.
pub fn demo_catalog() -> CatalogResult<Vec<Item>> {
    parse_catalog(DEMO_CATALOG)
}

/// Parses catalog TOML into items, in file order.
pub fn parse_catalog(text: &str) -> CatalogResult<Vec<Item>> {
    let file: CatalogFile = toml::from_str(text)?;

    let items = file
        .items
        .into_iter()
        .enumerate()
        .map(|(i, entry)| entry.into_item(i + 1))
        .collect::<CatalogResult<Vec<_>>>()?;

    debug!(count = items.len(), "Catalog parsed");
    Ok(items)
}

/// Reads and parses a catalog file.
pub fn load_catalog(path: &Path) -> CatalogResult<Vec<Item>> {
    let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let items = parse_catalog(&text)?;
    info!(?path, count = items.len(), "Catalog loaded");
    Ok(items)
}

/// Loads `path` if given, otherwise the demo catalog.
pub fn resolve_catalog(path: Option<&Path>) -> CatalogResult<Vec<Item>> {
    match path {
        Some(path) => load_catalog(path),
        None => {
            info!("Using demo catalog");
            demo_catalog()
        }
    }
}
