//! # Money Formatting
//!
//! Turns exact decimals into display strings such as `€1.234,50`.
//!
//! ## Template
//! ```text
//! format = "%s%v"     %s → symbol, %v → grouped number
//!
//!   1234.5  ──round(2)──► 1234.50 ──group──► 1.234,50 ──template──► €1.234,50
//!   -5      ──────────────────────────────────────────────────────► -€5,00
//! ```
//!
//! Rounding is half away from zero, the convention on printed invoices.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Formats monetary values, and plain numbers in the same locale, for display.
pub trait MoneyFormatter {
    fn format_money(&self, value: Decimal) -> String;

    /// Formats a non-monetary number (a quantity) with the same separators
    /// but no symbol, keeping the value's own scale.
    fn format_number(&self, value: Decimal) -> String;
}

/// Accounting-style formatting settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountingFormat {
    /// Currency symbol substituted for `%s`.
    pub symbol: String,
    /// Digits after the decimal separator.
    pub precision: u32,
    /// Thousands separator.
    pub thousand: String,
    /// Decimal separator.
    pub decimal: String,
    /// Output template using `%s` and `%v`.
    pub format: String,
}

impl Default for AccountingFormat {
    fn default() -> Self {
        AccountingFormat {
            symbol: "€".to_string(),
            precision: 2,
            thousand: ".".to_string(),
            decimal: ",".to_string(),
            format: "%s%v".to_string(),
        }
    }
}

impl AccountingFormat {
    /// Groups and separates `value`, already at its final scale. Returns
    /// the unsigned number and whether a minus sign is due.
    fn number(&self, mut value: Decimal) -> (String, bool) {
        let negative = value.is_sign_negative() && !value.is_zero();
        value.set_sign_positive(true);

        let plain = value.to_string();
        let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), ""));

        let mut number = self.group_thousands(int_part);
        if !frac_part.is_empty() {
            number.push_str(&self.decimal);
            number.push_str(frac_part);
        }
        (number, negative)
    }

    fn group_thousands(&self, digits: &str) -> String {
        let len = digits.len();
        let mut out = String::with_capacity(len + len / 3 * self.thousand.len());
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push_str(&self.thousand);
            }
            out.push(c);
        }
        out
    }
}

impl MoneyFormatter for AccountingFormat {
    fn format_money(&self, value: Decimal) -> String {
        let mut rounded =
            value.round_dp_with_strategy(self.precision, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(self.precision);
        let (number, negative) = self.number(rounded);

        let body = self
            .format
            .replace("%s", &self.symbol)
            .replace("%v", &number);
        if negative {
            format!("-{}", body)
        } else {
            body
        }
    }

    fn format_number(&self, value: Decimal) -> String {
        match self.number(value) {
            (number, true) => format!("-{}", number),
            (number, false) => number,
        }
    }
}
