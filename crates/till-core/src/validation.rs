//! # Validation Module
//!
//! Input validation for everything that feeds a checkout.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Types                                                        │
//! │  ├── Customer.age is u32      → never negative                         │
//! │  └── TaxRate is u32 ppm       → never negative                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Construction (THIS MODULE)                                   │
//! │  ├── Item::new → validate_item_name, validate_price                    │
//! │  └── config   → validate_tax_rate, validate_customer_age               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: checkout()                                                   │
//! │  └── Trusts its inputs, never fails                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::TaxRate;
use crate::{MAX_CUSTOMER_AGE, MAX_ITEM_NAME_LEN, MAX_PRICE_CENTS, MAX_TAX_RATE_PPM};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates an item name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 200 characters
///
/// ```rust
/// use till_core::validation::validate_item_name;
///
/// assert!(validate_item_name("Bananas").is_ok());
/// assert!(validate_item_name("   ").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an item price: zero (free items) up to `MAX_PRICE_CENTS`.
///
/// ```rust
/// use till_core::money::Money;
/// use till_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(495)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-1)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    if price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price_cents".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a tax rate: 0% to 100%.
pub fn validate_tax_rate(rate: TaxRate) -> ValidationResult<()> {
    if rate.ppm() > MAX_TAX_RATE_PPM {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate_ppm".to_string(),
            min: 0,
            max: MAX_TAX_RATE_PPM as i64,
        });
    }

    Ok(())
}

/// Validates a customer age: 0 to 150.
pub fn validate_customer_age(age: u32) -> ValidationResult<()> {
    if age > MAX_CUSTOMER_AGE {
        return Err(ValidationError::OutOfRange {
            field: "customer_age".to_string(),
            min: 0,
            max: MAX_CUSTOMER_AGE as i64,
        });
    }

    Ok(())
}
