//! Money type for representing monetary values.
//!
//! The storefront prices in whole rubles with no kopecks, so
//! `Money::rub(4000)` is four thousand rubles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// A ruble amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Money {
    /// Whole rubles.
    pub amount: i64,
}

impl Money {
    /// ISO 4217 code of every amount.
    pub const CURRENCY_CODE: &'static str = "RUB";

    /// Sign printed after the amount.
    pub const SYMBOL: &'static str = "\u{20bd}";

    /// Create a ruble amount.
    pub fn rub(amount: i64) -> Self {
        Self { amount }
    }

    pub fn zero() -> Self {
        Self::rub(0)
    }

    /// Multiply by a quantity, clamping at the numeric bounds.
    pub fn saturating_multiply(&self, factor: i64) -> Money {
        Money::rub(self.amount.saturating_mul(factor))
    }

    /// Add, clamping at the numeric bounds.
    pub fn saturating_add(&self, other: &Money) -> Money {
        Money::rub(self.amount.saturating_add(other.amount))
    }

    /// Format the amount with thousands grouping, without the symbol (e.g. "4 000").
    pub fn display_amount(&self) -> String {
        let digits = self.amount.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(' ');
            }
            grouped.push(ch);
        }

        let sign = if self.amount < 0 { "-" } else { "" };
        format!("{sign}{grouped}")
    }

    /// Format as a display string (e.g., "4 000 ₽").
    pub fn display(&self) -> String {
        format!("{} {}", self.display_amount(), Self::SYMBOL)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        self.saturating_add(&other)
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        self.saturating_multiply(factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_display() {
        assert_eq!(Money::rub(4000).display(), "4 000 \u{20bd}");
        assert_eq!(Money::rub(25000).display_amount(), "25 000");
        assert_eq!(Money::rub(1234567).display_amount(), "1 234 567");
        assert_eq!(Money::rub(500).display_amount(), "500");
        assert_eq!(Money::rub(0).display_amount(), "0");
        assert_eq!(Money::rub(-1500).display_amount(), "-1 500");
        assert_eq!(Money::rub(i64::MIN).display_amount(), "-9 223 372 036 854 775 808");
    }

    #[test]
    fn test_money_addition_saturates() {
        assert_eq!((Money::rub(1000) + Money::rub(500)).amount, 1500);
        assert_eq!((Money::rub(i64::MAX) + Money::rub(1)).amount, i64::MAX);
    }

    #[test]
    fn test_money_multiply_saturates() {
        assert_eq!((Money::rub(500) * 2).amount, 1000);
        assert_eq!(Money::rub(i64::MAX).saturating_multiply(2).amount, i64::MAX);
        assert_eq!(Money::rub(i64::MIN).saturating_multiply(2).amount, i64::MIN);
    }

    #[test]
    fn test_money_sum() {
        let total: Money = vec![Money::rub(1), Money::rub(2), Money::rub(3)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::rub(6));

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert_eq!(empty, Money::zero());
    }

    #[test]
    fn test_money_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Money::rub(4000)).unwrap(), "4000");
        let money: Money = serde_json::from_str("2800").unwrap();
        assert_eq!(money, Money::rub(2800));
    }
}
