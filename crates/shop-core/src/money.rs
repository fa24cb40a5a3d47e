//! # Money
//!
//! Naira amounts for the storefront. The catalog is single-currency (₦) and
//! zero-decimal for display, so an amount is just a count of the smallest
//! unit. Arithmetic saturates so derived totals are total functions.

use serde::{Deserialize, Serialize};

/// A non-negative amount in the smallest currency unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price {
    pub amount: i64,
}

impl Price {
    pub const ZERO: Price = Price { amount: 0 };

    /// Create a price from an amount in the smallest unit
    pub fn new(amount: i64) -> Self {
        Self {
            amount: amount.max(0),
        }
    }

    /// Line total: unit price × quantity, saturating
    pub fn times(&self, quantity: u32) -> Price {
        Price {
            amount: self.amount.saturating_mul(i64::from(quantity)),
        }
    }

    /// Saturating addition
    pub fn plus(&self, other: Price) -> Price {
        Price {
            amount: self.amount.saturating_add(other.amount),
        }
    }

    /// Format for display with thousands grouping (e.g. "₦35,000")
    pub fn display(&self) -> String {
        format!("₦{}", group_thousands(self.amount))
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

fn group_thousands(amount: i64) -> String {
    let digits = amount.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_grouping() {
        assert_eq!(Price::new(0).display(), "₦0");
        assert_eq!(Price::new(999).display(), "₦999");
        assert_eq!(Price::new(35000).display(), "₦35,000");
        assert_eq!(Price::new(1250000).display(), "₦1,250,000");
    }

    #[test]
    fn test_negative_amounts_clamped() {
        assert_eq!(Price::new(-5).amount, 0);
    }

    #[test]
    fn test_line_total_saturates() {
        let price = Price::new(i64::MAX);
        assert_eq!(price.times(2).amount, i64::MAX);
        assert_eq!(price.plus(Price::new(1)).amount, i64::MAX);
    }

    #[test]
    fn test_times() {
        assert_eq!(Price::new(35000).times(2).amount, 70000);
        assert_eq!(Price::new(35000).times(0).amount, 0);
    }
}
