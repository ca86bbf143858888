//! Type-safe money representation using decimal arithmetic.
//!
//! Display formatting follows the en-US currency style: a currency symbol
//! (or the ISO code followed by a space when no symbol is known), grouped
//! thousands and the currency's minor units.
//!
//! ```rust
//! use driftwood_core::{Money, MoneyRange};
//! use rust_decimal::Decimal;
//!
//! let price = Money::new(Decimal::new(123_450, 2), "USD");
//! assert_eq!(price.format(), "$1,234.50");
//!
//! let range = MoneyRange::new(
//!     Some(Money::new(Decimal::new(10, 0), "EUR")),
//!     Some(Money::new(Decimal::new(25, 0), "EUR")),
//! );
//! assert_eq!(range.format(), "€10.00 - €25.00");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors constructing a [`Money`] value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// The amount is NaN, infinite or out of `Decimal` range.
    #[error("invalid money amount: {0}")]
    InvalidAmount(String),
    /// The currency code is not a three-letter ISO 4217 code.
    #[error("invalid currency code: {0:?}")]
    InvalidCurrency(String),
}

/// A monetary amount with its ISO 4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code, upper case.
    pub currency: String,
}

impl Money {
    /// Create a new money value.
    #[must_use]
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    /// Create a money value from a floating point amount as returned by the
    /// commerce API.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError` if the amount can't be represented as a `Decimal`
    /// or the currency is not a three-letter code.
    pub fn from_f64(amount: f64, currency: &str) -> Result<Self, MoneyError> {
        let currency = currency.trim().to_ascii_uppercase();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(MoneyError::InvalidCurrency(currency));
        }

        let amount = Decimal::try_from(amount)
            .map_err(|_| MoneyError::InvalidAmount(amount.to_string()))?;

        Ok(Self { amount, currency })
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn format(&self) -> String {
        format_money(self.amount, &self.currency)
    }

    /// Plain decimal amount at the currency's minor units (e.g., "0.10").
    #[must_use]
    pub fn decimal_string(&self) -> String {
        let digits = minor_units(&self.currency);
        let rounded = self
            .amount
            .round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
        let digits = digits as usize;
        format!("{rounded:.digits$}")
    }
}

/// A price range spanning the cheapest and most expensive variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyRange {
    /// Lowest price.
    pub start: Option<Money>,
    /// Highest price.
    pub stop: Option<Money>,
}

impl MoneyRange {
    /// Create a new range.
    #[must_use]
    pub const fn new(start: Option<Money>, stop: Option<Money>) -> Self {
        Self { start, stop }
    }

    /// Format for display (e.g., "$10.00 - $25.00").
    #[must_use]
    pub fn format(&self) -> String {
        format_money_range(self.start.as_ref(), self.stop.as_ref())
    }
}

/// Format an amount in the given currency.
#[must_use]
pub fn format_money(amount: Decimal, currency: &str) -> String {
    let digits = minor_units(currency);
    let rounded = amount.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let digits = digits as usize;
    let plain = format!("{:.digits$}", rounded.abs());
    let (whole, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), ""));

    let mut out = String::with_capacity(plain.len() + 8);
    if negative {
        out.push('-');
    }
    match symbol(currency) {
        Some(symbol) => out.push_str(symbol),
        None => {
            out.push_str(currency);
            out.push(' ');
        }
    }
    out.push_str(&group_thousands(whole));
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Format a price range.
///
/// A range whose ends format identically collapses to a single value. A
/// range with only one end formats as that end.
#[must_use]
pub fn format_money_range(start: Option<&Money>, stop: Option<&Money>) -> String {
    match (start.map(Money::format), stop.map(Money::format)) {
        (None, None) => String::new(),
        (Some(single), None) | (None, Some(single)) => single,
        (Some(start), Some(stop)) if start == stop => start,
        (Some(start), Some(stop)) => format!("{start} - {stop}"),
    }
}

/// Currency symbols as rendered by the en-US locale.
fn symbol(currency: &str) -> Option<&'static str> {
    let symbol = match currency {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "CNY" => "CN¥",
        "INR" => "₹",
        "KRW" => "₩",
        "ILS" => "₪",
        "VND" => "₫",
        "CAD" => "CA$",
        "AUD" => "A$",
        "NZD" => "NZ$",
        "HKD" => "HK$",
        "MXN" => "MX$",
        "TWD" => "NT$",
        "BRL" => "R$",
        _ => return None,
    };
    Some(symbol)
}

/// Number of decimal places shown for a currency.
fn minor_units(currency: &str) -> u32 {
    match currency {
        "JPY" | "KRW" | "VND" | "CLP" | "ISK" | "UGX" => 0,
        "BHD" | "KWD" | "OMR" | "JOD" | "TND" => 3,
        _ => 2,
    }
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
