//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CoreError        - Parsing and general domain errors              │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  till-cli errors (separate crate)                                      │
//! │  └── CliError         - Config, catalog and output failures            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Not An Error
//! A customer failing a purchase restriction is a normal checkout outcome.
//! It shows up as a rejected line on the receipt, never as an error here.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A money amount could not be parsed.
    ///
    /// ## When This Occurs
    /// - Catalog price like `"4.955"` (more than two decimals)
    /// - Non-numeric text like `"free"`
    #[error("Invalid money amount '{input}': {reason}")]
    InvalidMoney { input: String, reason: String },

    /// A tax rate could not be parsed.
    #[error("Invalid tax rate '{input}': {reason}")]
    InvalidTaxRate { input: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised when items, customers or tax rates are assembled, so checkout
/// itself never sees invalid data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Field may not be set in this context.
    ///
    /// ## When This Occurs
    /// - A catalog `beer` entry giving its own name, price or tax status
    /// - `taxable` on a `food` or `good` entry
    #[error("{field} is not allowed: {reason}")]
    NotAllowed { field: String, reason: String },
}
