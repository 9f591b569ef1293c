//! Money type for representing monetary values.
//!
//! Amounts are kept in the smallest currency unit so that cart totals are
//! exact sums of `price * quantity`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    UAH,
    USD,
    EUR,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::UAH => "UAH",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::UAH => "грн",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Whether the symbol follows the amount ("100 грн") or leads it ("$100").
    pub fn symbol_after(&self) -> bool {
        matches!(self, Currency::UAH)
    }

    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Parse a currency code, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "UAH" => Some(Currency::UAH),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit (kopiykas, cents).
    pub amount_minor: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a value from a decimal amount, rounding to the nearest minor unit.
    ///
    /// ```
    /// use storefront_commerce::money::{Currency, Money};
    /// let price = Money::from_decimal(149.50, Currency::UAH);
    /// assert_eq!(price.amount_minor, 14950);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        Self::new((amount * multiplier as f64).round() as i64, currency)
    }

    /// Create a value from whole units (hryvnias, dollars).
    pub fn from_units(units: i64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        Self::new(units.saturating_mul(multiplier), currency)
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    pub fn is_negative(&self) -> bool {
        self.amount_minor < 0
    }

    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_minor as f64 / divisor as f64
    }

    /// Add another value, returning `None` on a currency mismatch.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_minor.saturating_add(other.amount_minor),
            self.currency,
        ))
    }

    /// Multiply by a quantity. Saturates instead of wrapping.
    pub fn times(&self, quantity: u32) -> Money {
        Money::new(
            self.amount_minor.saturating_mul(i64::from(quantity)),
            self.currency,
        )
    }

    /// Human-readable amount, e.g. "100 грн" or "$49.99".
    ///
    /// Whole amounts are printed without a fractional part.
    pub fn display(&self) -> String {
        let amount = self.display_amount();
        if self.currency.symbol_after() {
            format!("{} {}", amount, self.currency.symbol())
        } else {
            format!("{}{}", self.currency.symbol(), amount)
        }
    }

    pub fn display_amount(&self) -> String {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        if self.amount_minor % divisor == 0 {
            format!("{}", self.amount_minor / divisor)
        } else {
            let places = self.currency.decimal_places() as usize;
            format!("{:.places$}", self.to_decimal())
        }
    }
}

impl Add for Money {
    type Output = Money;

    /// Adds amounts; a mismatched right-hand currency is ignored.
    fn add(self, other: Money) -> Money {
        self.try_add(&other).unwrap_or(self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let m = Money::from_units(100, Currency::UAH);
        assert_eq!(m.amount_minor, 10000);
    }

    #[test]
    fn test_display_whole_and_fractional() {
        assert_eq!(Money::from_units(100, Currency::UAH).display(), "100 грн");
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
    }

    #[test]
    fn test_times() {
        let m = Money::from_units(100, Currency::UAH).times(3);
        assert_eq!(m.amount_minor, 30000);
    }

    #[test]
    fn test_try_add_currency_mismatch() {
        let uah = Money::from_units(1, Currency::UAH);
        let usd = Money::from_units(1, Currency::USD);
        assert!(uah.try_add(&usd).is_none());
        assert_eq!(uah + usd, uah);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("uah"), Some(Currency::UAH));
        assert_eq!(Currency::from_code("XYZ"), None);
    }
}
