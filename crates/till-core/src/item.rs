//! # Catalog Items
//!
//! An `Item` is anything the customer can put on the counter.
//!
//! ## One Type, Explicit Flags
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Item                                                                   │
//! │  ─────────────────────────────────────────────                          │
//! │  name           "Beer"                                                  │
//! │  price          4.95                                                    │
//! │  taxable        true      ← part of the tax base?                       │
//! │  restrictions   [minimum age 21]   ← checked in order at checkout       │
//! │                                                                         │
//! │  Item::food(..)  → taxable = false, no restrictions                     │
//! │  Item::good(..)  → taxable = true,  no restrictions                     │
//! │  Item::beer()    → taxable = true,  [AgeRestriction(21)]                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every kind is the same `Item`, so checkout treats them uniformly. The
//! only thing that varies between kinds is data.

use std::sync::Arc;

use crate::money::Money;
use crate::restriction::{AgeRestriction, Restriction};
use crate::types::Customer;
use crate::validation::{validate_item_name, validate_price, ValidationResult};

/// Fixed price of [`Item::beer`], in cents.
pub const BEER_PRICE_CENTS: i64 = 495;

/// Minimum age to buy [`Item::beer`].
pub const BEER_MINIMUM_AGE: u32 = 21;

/// A purchasable catalog entry.
///
/// Immutable once built: fields are private and there are no setters.
/// `Clone` is cheap since restrictions are shared behind `Arc`.
#[derive(Debug, Clone)]
pub struct Item {
    name: String,
    price: Money,
    taxable: bool,
    restrictions: Vec<Arc<dyn Restriction>>,
}

impl Item {
    /// Creates an unrestricted item.
    ///
    /// ## Errors
    /// - Name empty or longer than 200 characters
    /// - Negative price, or above `MAX_PRICE_CENTS`
    pub fn new(name: impl Into<String>, price: Money, taxable: bool) -> ValidationResult<Self> {
        let name = name.into();
        validate_item_name(&name)?;
        validate_price(price)?;

        Ok(Item {
            name: name.trim().to_string(),
            price,
            taxable,
            restrictions: Vec::new(),
        })
    }

    /// Groceries: not taxable.
    ///
    /// ```rust
    /// use till_core::{Item, Money};
    ///
    /// let bananas = Item::food("Bananas", Money::from_cents(125)).unwrap();
    /// assert!(!bananas.taxable());
    /// assert!(bananas.restrictions().is_empty());
    /// ```
    pub fn food(name: impl Into<String>, price: Money) -> ValidationResult<Self> {
        Item::new(name, price, false)
    }

    /// General merchandise: taxable.
    pub fn good(name: impl Into<String>, price: Money) -> ValidationResult<Self> {
        Item::new(name, price, true)
    }

    /// Beer: fixed name and price, taxable, and only sold to customers aged
    /// 21 or over.
    pub fn beer() -> Self {
        let over_21: Arc<dyn Restriction> = Arc::new(AgeRestriction::new(BEER_MINIMUM_AGE));
        Item {
            name: "Beer".to_string(),
            price: Money::from_cents(BEER_PRICE_CENTS),
            taxable: true,
            restrictions: vec![over_21],
        }
    }

    /// Appends a restriction. Restrictions are checked in the order added.
    pub fn with_restriction<R>(mut self, restriction: R) -> Self
    where
        R: Restriction + 'static,
    {
        self.restrictions.push(Arc::new(restriction));
        self
    }

    /// Appends an already shared restriction.
    pub fn with_shared_restriction(mut self, restriction: Arc<dyn Restriction>) -> Self {
        self.restrictions.push(restriction);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    #[inline]
    pub fn taxable(&self) -> bool {
        self.taxable
    }

    /// The item's restrictions in evaluation order. Empty when unrestricted.
    #[inline]
    pub fn restrictions(&self) -> &[Arc<dyn Restriction>] {
        &self.restrictions
    }

    /// Returns the first restriction, in order, that the customer fails.
    ///
    /// Stops at the first failure, so later restrictions are never
    /// evaluated for that customer.
    pub fn first_failed_restriction(&self, customer: &Customer) -> Option<&dyn Restriction> {
        self.restrictions
            .iter()
            .map(|r| &**r)
            .find(|r| !r.is_allowed(customer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use std::fmt;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts how often it is evaluated.
    #[derive(Debug, Default)]
    struct Probe {
        calls: AtomicUsize,
    }

    impl Restriction for Probe {
        fn is_allowed(&self, _customer: &Customer) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            true
        }
    }

    impl fmt::Display for Probe {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "probe")
        }
    }

    #[test]
    fn test_food_and_good_taxability() {
        let food = Item::food("Cereal", Money::from_cents(375)).unwrap();
        let good = Item::good("Candy", Money::from_cents(250)).unwrap();

        assert!(!food.taxable());
        assert!(good.taxable());
        assert_eq!(food.name(), "Cereal");
        assert_eq!(good.price().cents(), 250);
    }

    #[test]
    fn test_beer_is_fixed() {
        let beer = Item::beer();
        assert_eq!(beer.name(), "Beer");
        assert_eq!(beer.price().to_plain_string(), "4.95");
        assert!(beer.taxable());
        assert_eq!(beer.restrictions().len(), 1);
        assert_eq!(beer.restrictions()[0].to_string(), "minimum age 21");
    }

    #[test]
    fn test_new_rejects_invalid_input() {
        assert!(matches!(
            Item::food("Bananas", Money::from_cents(-125)),
            Err(ValidationError::MustBeNonNegative { .. })
        ));
        assert!(matches!(
            Item::good("  ", Money::from_cents(100)),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_name_is_trimmed() {
        let item = Item::food("  Bananas ", Money::from_cents(125)).unwrap();
        assert_eq!(item.name(), "Bananas");
    }

    #[test]
    fn test_first_failed_restriction_order() {
        let item = Item::good("Wine", Money::from_cents(1200))
            .unwrap()
            .with_restriction(AgeRestriction::new(18))
            .with_restriction(AgeRestriction::new(21));

        let adult = Customer::new(30);
        let teen = Customer::new(16);
        let nineteen = Customer::new(19);

        assert!(item.first_failed_restriction(&adult).is_none());
        assert_eq!(
            item.first_failed_restriction(&teen).map(|r| r.to_string()),
            Some("minimum age 18".to_string())
        );
        assert_eq!(
            item.first_failed_restriction(&nineteen).map(|r| r.to_string()),
            Some("minimum age 21".to_string())
        );
    }

    #[test]
    fn test_first_failure_short_circuits() {
        let probe = Arc::new(Probe::default());
        let item = Item::good("Cigars", Money::from_cents(900))
            .unwrap()
            .with_restriction(AgeRestriction::new(21))
            .with_shared_restriction(probe.clone());

        assert!(item.first_failed_restriction(&Customer::new(19)).is_some());
        assert_eq!(probe.calls.load(Ordering::SeqCst), 0);

        assert!(item.first_failed_restriction(&Customer::new(25)).is_none());
        assert_eq!(probe.calls.load(Ordering::SeqCst), 1);
    }
}
