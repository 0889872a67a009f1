//! # till-core: Pure Business Logic for Till
//!
//! The checkout domain: items, purchase restrictions, money, and the
//! checkout routine that turns a basket into a receipt.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    till-cli (binary)                            │   │
//! │  │    config ──► catalog ──► customer ──► print receipt            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   item    │  │   money   │  │ checkout  │  │ validation│  │   │
//! │  │   │   Item    │  │   Money   │  │  Receipt  │  │   rules   │  │   │
//! │  │   │Restriction│  │  TaxRate  │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO FILES • NO ENVIRONMENT • PURE FUNCTIONS                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`item`] - Catalog items (Food, Good, Beer)
//! - [`restriction`] - Purchase restrictions
//! - [`checkout`] - The checkout routine and receipt
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Tax rate and customer
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::{checkout, Customer, Item, Money, TaxRate};
//!
//! let items = vec![
//!     Item::good("Candy", Money::from_cents(250)).unwrap(),
//!     Item::beer(),
//! ];
//!
//! let receipt = checkout(&items, TaxRate::from_bps(825), &Customer::new(21));
//! assert_eq!(receipt.total.to_plain_string(), "8.06");
//! print!("{}", receipt);
//! ```

pub mod checkout;
pub mod error;
pub mod item;
pub mod money;
pub mod restriction;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{checkout, Receipt, ReceiptLine};
pub use error::{CoreError, ValidationError};
pub use item::Item;
pub use money::Money;
pub use restriction::{AgeRestriction, Restriction};
pub use types::{Customer, TaxRate};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Longest accepted item name, in characters.
pub const MAX_ITEM_NAME_LEN: usize = 200;

/// Highest accepted item price: 100,000,000.00.
///
/// A basket would need over 900 million such items before its total left
/// the `i64` range.
pub const MAX_PRICE_CENTS: i64 = 10_000_000_000;

/// Highest accepted tax rate: 1,000,000 ppm = 100%.
pub const MAX_TAX_RATE_PPM: u32 = 1_000_000;

/// Highest accepted customer age.
pub const MAX_CUSTOMER_AGE: u32 = 150;
