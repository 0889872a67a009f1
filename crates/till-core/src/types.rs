//! # Domain Types
//!
//! Small value types shared by the item model and the checkout routine.
//!
//! ```text
//! ┌─────────────────┐   ┌─────────────────┐
//! │    TaxRate      │   │    Customer     │
//! │  ─────────────  │   │  ─────────────  │
//! │  ppm (u32)      │   │  age (u32)      │
//! │ 82500 = 8.25%   │   │                 │
//! └─────────────────┘   └─────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

// =============================================================================
// Tax Rate
// =============================================================================

/// Parts per million in one whole (100%).
const PPM_PER_WHOLE: u32 = 1_000_000;

/// Tax rate represented in parts per million (ppm).
///
/// ## Why Parts Per Million?
/// 1 ppm = 0.0001%. Basis points cannot hold a rate like 8.875%, while
/// 88_750 ppm holds it exactly. Any percentage with up to four fractional
/// digits is representable with no drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from parts per million.
    #[inline]
    pub const fn from_ppm(ppm: u32) -> Self {
        TaxRate(ppm)
    }

    /// Creates a tax rate from basis points: `from_bps(825)` is 8.25%.
    ///
    /// Saturates instead of overflowing.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps.saturating_mul(100))
    }

    /// Returns the rate in parts per million.
    #[inline]
    pub const fn ppm(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

/// Renders as a percentage with two to four fractional digits:
/// `8.25%`, `8.875%`, `10.00%`.
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 10_000 ppm per percent
        let whole = self.0 / 10_000;
        let frac = format!("{:04}", self.0 % 10_000);
        let frac = frac.trim_end_matches('0');
        write!(f, "{}.{:0<2}%", whole, frac)
    }
}

/// Parses a percentage string: `"8.25"` is 82_500 ppm.
///
/// A trailing `%` is accepted. At most four fractional digits, the
/// precision of the ppm representation; anything finer is rejected rather
/// than rounded.
impl FromStr for TaxRate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CoreError::InvalidTaxRate {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();

        let (whole_str, frac_str) = match trimmed.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (trimmed, ""),
        };

        if whole_str.is_empty() && frac_str.is_empty() {
            return Err(invalid("no digits"));
        }
        if !whole_str.chars().all(|c| c.is_ascii_digit())
            || !frac_str.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("expected a non-negative percentage like 8.25"));
        }
        if frac_str.len() > 4 {
            return Err(invalid("at most four decimal places"));
        }

        let whole: u32 = if whole_str.is_empty() {
            0
        } else {
            whole_str.parse().map_err(|_| invalid("rate too large"))?
        };
        let frac: u32 = if frac_str.is_empty() {
            0
        } else {
            // "875" → 8750 ten-thousandths of a percent
            format!("{:0<4}", frac_str)
                .parse()
                .map_err(|_| invalid("bad fraction"))?
        };

        whole
            .checked_mul(PPM_PER_WHOLE / 100)
            .and_then(|ppm| ppm.checked_add(frac))
            .map(TaxRate)
            .ok_or_else(|| invalid("rate too large"))
    }
}

// =============================================================================
// Customer
// =============================================================================

/// The purchaser, reduced to the attributes restrictions look at.
///
/// Age is unsigned, so a negative age cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub age: u32,
}

impl Customer {
    #[inline]
    pub const fn new(age: u32) -> Self {
        Customer { age }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(825);
        assert_eq!(rate.ppm(), 82_500);
        assert_eq!(rate, TaxRate::from_ppm(82_500));
        assert_eq!(TaxRate::from_bps(u32::MAX).ppm(), u32::MAX);
    }

    #[test]
    fn test_tax_rate_parse() {
        assert_eq!("8.25".parse::<TaxRate>().unwrap().ppm(), 82_500);
        assert_eq!("8.25%".parse::<TaxRate>().unwrap().ppm(), 82_500);
        assert_eq!("10".parse::<TaxRate>().unwrap().ppm(), 100_000);
        assert_eq!("7.5".parse::<TaxRate>().unwrap().ppm(), 75_000);
        assert_eq!("0".parse::<TaxRate>().unwrap(), TaxRate::zero());

        assert!("".parse::<TaxRate>().is_err());
        assert!("-1".parse::<TaxRate>().is_err());
        assert!("eight".parse::<TaxRate>().is_err());
        assert!("99999999".parse::<TaxRate>().is_err());
    }

    #[test]
    fn test_tax_rate_parse_keeps_sub_basis_point_precision() {
        assert_eq!("8.875".parse::<TaxRate>().unwrap().ppm(), 88_750);
        assert_eq!("8.8751".parse::<TaxRate>().unwrap().ppm(), 88_751);
        assert_eq!(".0001".parse::<TaxRate>().unwrap().ppm(), 1);

        let err = "8.87501".parse::<TaxRate>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidTaxRate { .. }));
    }

    #[test]
    fn test_tax_rate_display() {
        assert_eq!(TaxRate::from_bps(825).to_string(), "8.25%");
        assert_eq!(TaxRate::from_bps(1000).to_string(), "10.00%");
        assert_eq!(TaxRate::zero().to_string(), "0.00%");
        assert_eq!(TaxRate::from_ppm(88_750).to_string(), "8.875%");
        assert_eq!(TaxRate::from_ppm(88_751).to_string(), "8.8751%");
    }

    #[test]
    fn test_customer_new() {
        assert_eq!(Customer::new(19).age, 19);
    }
}
