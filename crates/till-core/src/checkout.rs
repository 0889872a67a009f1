//! # Checkout
//!
//! Rings up an ordered list of items for one customer and produces a
//! [`Receipt`].
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  for item in items (in order)                                           │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  first_failed_restriction(customer)?                                    │
//! │      │                                                                  │
//! │      ├── Some(r) → Rejected line, item adds nothing                     │
//! │      │                                                                  │
//! │      └── None    → Purchased line                                       │
//! │                     subtotal      += price                              │
//! │                     taxable_total += price   (taxable items only)       │
//! │                                                                         │
//! │  tax   = taxable_total × rate   (rounded once, half-up, to the cent)    │
//! │  total = subtotal + tax                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Receipt Text
//! ```text
//! Bananas    1.25
//! Cereal    3.75
//! Candy    2.50
//! Customer is unable to purchase Beer. Failed restriction: minimum age 21
//! ------------------------
//! SUBTOTAL:     7.50
//! TAX:     0.21
//! TOTAL:     7.71
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use tracing::{debug, debug_span, info};

use crate::item::Item;
use crate::money::Money;
use crate::types::{Customer, TaxRate};

/// Line printed between the item lines and the totals.
pub const SEPARATOR: &str = "------------------------";

// =============================================================================
// Receipt
// =============================================================================

/// One line of the receipt, in the same order as the input items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReceiptLine {
    /// The customer bought this item.
    Purchased {
        name: String,
        price: Money,
        taxable: bool,
    },
    /// A restriction blocked the purchase. `restriction` is the first
    /// failing one, as displayed.
    Rejected { name: String, restriction: String },
}

impl fmt::Display for ReceiptLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiptLine::Purchased { name, price, .. } => write!(f, "{}    {}", name, price),
            ReceiptLine::Rejected { name, restriction } => write!(
                f,
                "Customer is unable to purchase {}. Failed restriction: {}",
                name, restriction
            ),
        }
    }
}

/// The outcome of a checkout.
///
/// ## Invariants
/// - `subtotal` is the sum of purchased prices
/// - `taxable_total` is the sum of purchased taxable prices
/// - `total == subtotal + tax`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub lines: Vec<ReceiptLine>,
    pub subtotal: Money,
    pub taxable_total: Money,
    pub tax: Money,
    pub total: Money,
}

impl Receipt {
    /// Purchased lines as `(name, price)`.
    pub fn purchased(&self) -> impl Iterator<Item = (&str, Money)> + '_ {
        self.lines.iter().filter_map(|line| match line {
            ReceiptLine::Purchased { name, price, .. } => Some((name.as_str(), *price)),
            ReceiptLine::Rejected { .. } => None,
        })
    }

    /// Rejected lines as `(name, failed restriction)`.
    pub fn rejected(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.lines.iter().filter_map(|line| match line {
            ReceiptLine::Rejected { name, restriction } => {
                Some((name.as_str(), restriction.as_str()))
            }
            ReceiptLine::Purchased { .. } => None,
        })
    }

    /// True when no item lines were produced at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Writes the receipt text, one line per `\n`.
    pub fn write_to<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self)
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        writeln!(f, "{}", SEPARATOR)?;
        writeln!(f, "SUBTOTAL:     {}", self.subtotal)?;
        writeln!(f, "TAX:     {}", self.tax)?;
        writeln!(f, "TOTAL:     {}", self.total)
    }
}

// =============================================================================
// Checkout Routine
// =============================================================================

/// Rings up `items` for `customer` at `tax_rate`.
///
/// Never fails: a failed restriction is reported on the receipt and the
/// item is skipped. Inputs are only read, so calling this twice with the
/// same arguments yields equal receipts.
///
/// ## Example
/// ```rust
/// use till_core::{checkout, Customer, Item, Money, TaxRate};
///
/// let items = vec![
///     Item::food("Bananas", Money::from_cents(125)).unwrap(),
///     Item::food("Cereal", Money::from_cents(375)).unwrap(),
///     Item::good("Candy", Money::from_cents(250)).unwrap(),
///     Item::beer(),
/// ];
///
/// let receipt = checkout(&items, TaxRate::from_bps(825), &Customer::new(19));
/// assert_eq!(receipt.subtotal.to_plain_string(), "7.50");
/// assert_eq!(receipt.tax.to_plain_string(), "0.21");
/// assert_eq!(receipt.total.to_plain_string(), "7.71");
/// ```
pub fn checkout(items: &[Item], tax_rate: TaxRate, customer: &Customer) -> Receipt {
    let span = debug_span!(
        "checkout",
        items = items.len(),
        customer_age = customer.age,
        tax_ppm = tax_rate.ppm()
    );
    let _guard = span.enter();

    let mut lines = Vec::with_capacity(items.len());
    let mut subtotal = Money::zero();
    let mut taxable_total = Money::zero();

    for item in items {
        if let Some(failed) = item.first_failed_restriction(customer) {
            info!(item = item.name(), restriction = %failed, "Purchase rejected");
            lines.push(ReceiptLine::Rejected {
                name: item.name().to_string(),
                restriction: failed.to_string(),
            });
            continue;
        }

        debug!(item = item.name(), price = %item.price(), taxable = item.taxable(), "Item purchased");
        lines.push(ReceiptLine::Purchased {
            name: item.name().to_string(),
            price: item.price(),
            taxable: item.taxable(),
        });
        subtotal += item.price();

        if item.taxable() {
            taxable_total += item.price();
        }
    }

    let tax = taxable_total.calculate_tax(tax_rate);
    let total = subtotal + tax;

    debug!(%subtotal, %taxable_total, %tax, %total, "Checkout complete");

    Receipt {
        lines,
        subtotal,
        taxable_total,
        tax,
        total,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::restriction::{AgeRestriction, Restriction};

    fn groceries() -> Vec<Item> {
        vec![
            Item::food("Bananas", Money::from_cents(125)).unwrap(),
            Item::food("Cereal", Money::from_cents(375)).unwrap(),
            Item::good("Candy", Money::from_cents(250)).unwrap(),
            Item::beer(),
        ]
    }

    fn rate() -> TaxRate {
        TaxRate::from_bps(825)
    }

    #[test]
    fn test_underage_customer_is_refused_beer() {
        let receipt = checkout(&groceries(), rate(), &Customer::new(19));

        assert_eq!(receipt.subtotal.cents(), 750);
        assert_eq!(receipt.taxable_total.cents(), 250);
        assert_eq!(receipt.tax.cents(), 21);
        assert_eq!(receipt.total.cents(), 771);

        let rejected: Vec<_> = receipt.rejected().collect();
        assert_eq!(rejected, vec![("Beer", "minimum age 21")]);
    }

    #[test]
    fn test_underage_receipt_text() {
        let receipt = checkout(&groceries(), rate(), &Customer::new(19));
        let expected = "\
Bananas    1.25
Cereal    3.75
Candy    2.50
Customer is unable to purchase Beer. Failed restriction: minimum age 21
------------------------
SUBTOTAL:     7.50
TAX:     0.21
TOTAL:     7.71
";
        assert_eq!(receipt.to_string(), expected);
    }

    #[test]
    fn test_of_age_customer_buys_beer() {
        let receipt = checkout(&groceries(), rate(), &Customer::new(21));

        assert_eq!(receipt.subtotal.to_plain_string(), "12.45");
        assert_eq!(receipt.taxable_total.to_plain_string(), "7.45");
        assert_eq!(receipt.tax.to_plain_string(), "0.61");
        assert_eq!(receipt.total.to_plain_string(), "13.06");
        assert_eq!(receipt.rejected().count(), 0);

        let text = receipt.to_string();
        assert!(text.contains("Beer    4.95\n"));
        assert!(text.ends_with("TOTAL:     13.06\n"));
    }

    #[test]
    fn test_empty_cart() {
        let receipt = checkout(&[], rate(), &Customer::new(40));

        assert!(receipt.is_empty());
        assert!(receipt.total.is_zero());
        assert_eq!(
            receipt.to_string(),
            "------------------------\nSUBTOTAL:     0.00\nTAX:     0.00\nTOTAL:     0.00\n"
        );
    }

    #[test]
    fn test_unrestricted_totals_match_sums() {
        let items = vec![
            Item::food("Rice", Money::from_cents(399)).unwrap(),
            Item::good("Soap", Money::from_cents(1000)).unwrap(),
            Item::good("Batteries", Money::from_cents(649)).unwrap(),
            Item::food("Milk", Money::from_cents(289)).unwrap(),
        ];
        let tax_rate = TaxRate::from_bps(1000);
        let receipt = checkout(&items, tax_rate, &Customer::new(30));

        let subtotal: Money = items.iter().map(Item::price).sum();
        let taxable: Money = items
            .iter()
            .filter(|i| i.taxable())
            .map(Item::price)
            .sum();

        assert_eq!(receipt.subtotal, subtotal);
        assert_eq!(receipt.taxable_total, taxable);
        assert_eq!(receipt.tax, taxable.calculate_tax(tax_rate));
        assert_eq!(receipt.total, receipt.subtotal + receipt.tax);
        assert_eq!(receipt.purchased().count(), 4);
    }

    #[test]
    fn test_reports_first_failing_restriction_and_excludes_item() {
        let whisky = Item::good("Whisky", Money::from_cents(3000))
            .unwrap()
            .with_restriction(AgeRestriction::new(18))
            .with_restriction(AgeRestriction::new(25))
            .with_restriction(AgeRestriction::new(99));
        let items = vec![whisky, Item::food("Bread", Money::from_cents(200)).unwrap()];

        let receipt = checkout(&items, rate(), &Customer::new(21));

        let rejected: Vec<_> = receipt.rejected().collect();
        assert_eq!(rejected, vec![("Whisky", "minimum age 25")]);
        assert_eq!(receipt.subtotal.cents(), 200);
        assert!(receipt.taxable_total.is_zero());
        assert!(receipt.tax.is_zero());
    }

    #[test]
    fn test_lines_keep_item_order() {
        let items = vec![
            Item::beer(),
            Item::food("Apples", Money::from_cents(300)).unwrap(),
            Item::beer(),
        ];
        let receipt = checkout(&items, rate(), &Customer::new(18));

        let names: Vec<String> = receipt
            .lines
            .iter()
            .map(|line| match line {
                ReceiptLine::Purchased { name, .. } | ReceiptLine::Rejected { name, .. } => {
                    name.clone()
                }
            })
            .collect();
        assert_eq!(names, vec!["Beer", "Apples", "Beer"]);
        assert_eq!(receipt.rejected().count(), 2);
    }

    #[test]
    fn test_checkout_is_idempotent() {
        let items = groceries();
        let customer = Customer::new(19);

        let first = checkout(&items, rate(), &customer);
        let second = checkout(&items, rate(), &customer);

        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
        assert_eq!(customer.age, 19);
        assert_eq!(items.len(), 4);
    }

    #[test]
    fn test_custom_restriction() {
        #[derive(Debug)]
        struct NoOneNamed(&'static str);

        impl Restriction for NoOneNamed {
            fn is_allowed(&self, _customer: &Customer) -> bool {
                false
            }
        }

        impl fmt::Display for NoOneNamed {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "sold out: {}", self.0)
            }
        }

        let item = Item::good("Tickets", Money::from_cents(5000))
            .unwrap()
            .with_restriction(NoOneNamed("tonight"));
        let receipt = checkout(&[item], rate(), &Customer::new(40));

        assert_eq!(
            receipt.lines[0].to_string(),
            "Customer is unable to purchase Tickets. Failed restriction: sold out: tonight"
        );
    }

    #[test]
    fn test_most_expensive_items_total_exactly() {
        let max = Money::from_cents(crate::MAX_PRICE_CENTS);
        let items = vec![
            Item::food("Yacht", max).unwrap(),
            Item::food("Island", max).unwrap(),
            Item::good("Jet", max).unwrap(),
        ];
        assert!(Item::food("Moon", Money::from_cents(crate::MAX_PRICE_CENTS + 1)).is_err());

        let receipt = checkout(&items, TaxRate::from_bps(825), &Customer::new(30));

        assert_eq!(receipt.subtotal.cents(), 3 * crate::MAX_PRICE_CENTS);
        assert_eq!(receipt.taxable_total, max);
        assert_eq!(receipt.tax.cents(), 825_000_000);
        assert_eq!(receipt.total.cents(), 3 * crate::MAX_PRICE_CENTS + 825_000_000);
    }

    #[test]
    fn test_sub_basis_point_tax_rate() {
        let receipt = checkout(&groceries(), "8.875".parse().unwrap(), &Customer::new(21));
        // 7.45 × 8.875% = 0.6611875 → 0.66
        assert_eq!(receipt.tax.cents(), 66);
        assert_eq!(receipt.total.cents(), 1311);
    }

    #[test]
    fn test_write_to_matches_display() {
        let receipt = checkout(&groceries(), rate(), &Customer::new(21));
        let mut buf = Vec::new();
        receipt.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), receipt.to_string());
    }

    #[test]
    fn test_receipt_json_shape() {
        let receipt = checkout(&groceries(), rate(), &Customer::new(19));
        let json = serde_json::to_value(&receipt).unwrap();

        assert_eq!(json["subtotal"], 750);
        assert_eq!(json["tax"], 21);
        assert_eq!(json["total"], 771);
        assert_eq!(json["lines"][0]["status"], "purchased");
        assert_eq!(json["lines"][0]["name"], "Bananas");
        assert_eq!(json["lines"][3]["status"], "rejected");
        assert_eq!(json["lines"][3]["restriction"], "minimum age 21");

        let back: Receipt = serde_json::from_value(json).unwrap();
        assert_eq!(back, receipt);
    }
}
