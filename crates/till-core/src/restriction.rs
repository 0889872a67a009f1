//! # Purchase Restrictions
//!
//! A restriction is a single purchase precondition checked against the
//! customer at checkout.
//!
//! ## Extending
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  trait Restriction                                                      │
//! │    is_allowed(&Customer) -> bool                                        │
//! │    Display  → text shown on the rejection line                          │
//! │                                                                         │
//! │  AgeRestriction { minimum_age }   ← today                               │
//! │  (time-of-day, quantity limits…)  ← implement the trait, no changes     │
//! │                                     to Item or checkout required        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Implementations must be pure: checkout calls `is_allowed` on every run and
//! relies on the same customer always getting the same answer.

use std::fmt;

use crate::types::Customer;

/// A purchase precondition evaluated against a customer.
///
/// The `Display` output is the text printed after `Failed restriction:` on
/// the receipt's rejection line, e.g. `minimum age 21`.
pub trait Restriction: fmt::Debug + fmt::Display + Send + Sync {
    /// Returns true if the customer may buy an item carrying this restriction.
    fn is_allowed(&self, customer: &Customer) -> bool;
}

/// Requires the customer to be at least `minimum_age` years old.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRestriction {
    pub minimum_age: u32,
}

impl AgeRestriction {
    pub const fn new(minimum_age: u32) -> Self {
        AgeRestriction { minimum_age }
    }
}

impl Restriction for AgeRestriction {
    fn is_allowed(&self, customer: &Customer) -> bool {
        customer.age >= self.minimum_age
    }
}

/// Rendered on rejection lines as `minimum age <n>`.
impl fmt::Display for AgeRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "minimum age {}", self.minimum_age)
    }
}
