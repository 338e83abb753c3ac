//! # Money Module
//!
//! Exact decimal helpers for every monetary and percentage value on a line.
//!
//! ## Why Decimal?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Summed over many invoice lines the drift reaches whole cents.          │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal::Decimal                                    │
//! │    "0.1" + "0.2" = 0.3 exactly                                          │
//! │    Quantities like "1.5" (hours) keep their scale                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Contract
//! Every monetary field arrives as text with a period as the decimal
//! separator. `"12,50"`, `"1e3"` and `" 5"` are rejected rather than guessed at.
//!
//! ## Usage
//! ```rust
//! use folio_core::error::LineField;
//! use folio_core::money::{parse_decimal, percent_of};
//! use rust_decimal::Decimal;
//!
//! let price = parse_decimal(LineField::UnitPrice, "100.00").unwrap();
//! let rate = parse_decimal(LineField::TaxPercent, "10").unwrap();
//! assert_eq!(percent_of(price, rate), Some(Decimal::new(10, 0)));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{LineField, ParseError};

/// An exact decimal amount of money or a percentage.
pub type MonetaryValue = Decimal;

/// Scale used for derived percentage labels (e.g. the effective rate of a
/// fixed tax amount).
pub const LABEL_PERCENT_SCALE: u32 = 2;

// =============================================================================
// Parsing
// =============================================================================

/// Parses a period-separated decimal string.
///
/// ## Accepted Grammar
/// ```text
/// ["-"] digits ["." digits]
/// ```
///
/// ## Example
/// ```rust
/// use folio_core::error::LineField;
/// use folio_core::money::parse_decimal;
///
/// assert!(parse_decimal(LineField::Quantity, "1.5").is_ok());
/// assert!(parse_decimal(LineField::Quantity, "12,50").is_err());
/// assert!(parse_decimal(LineField::Quantity, "").is_err());
/// ```
pub fn parse_decimal(field: LineField, text: &str) -> Result<MonetaryValue, ParseError> {
    let fail = |reason: String| ParseError {
        field,
        value: text.to_string(),
        reason,
    };

    check_grammar(text).map_err(fail)?;

    // from_str_exact refuses to silently round text with excess precision
    Decimal::from_str_exact(text).map_err(|e| fail(e.to_string()))
}

fn check_grammar(text: &str) -> Result<(), String> {
    if text.is_empty() {
        return Err("empty string".to_string());
    }

    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    if let Some(c) = unsigned.chars().find(|c| !c.is_ascii_digit() && *c != '.') {
        return Err(format!("unexpected character '{}'", c));
    }

    if int_part.is_empty() {
        return Err("missing integer digits".to_string());
    }

    match frac_part {
        Some("") => Err("missing fraction digits".to_string()),
        Some(frac) if frac.contains('.') => Err("more than one decimal point".to_string()),
        _ => Ok(()),
    }
}

// =============================================================================
// Percentages
// =============================================================================

/// Returns `base × (percent / 100)`, or `None` if the product overflows.
#[inline]
pub fn percent_of(base: MonetaryValue, percent: MonetaryValue) -> Option<MonetaryValue> {
    base.checked_mul(percent.checked_div(Decimal::ONE_HUNDRED)?)
}

/// Returns what percentage `part` is of `whole`, rounded half away from zero
/// to [`LABEL_PERCENT_SCALE`] places.
///
/// Returns `None` when `whole` is zero or the share does not fit the
/// decimal range.
///
/// ## Example
/// ```rust
/// use folio_core::money::share_percent;
/// use rust_decimal::Decimal;
///
/// let share = share_percent(Decimal::new(5, 0), Decimal::new(40, 0)).unwrap();
/// assert_eq!(share.to_string(), "12.50");
/// assert!(share_percent(Decimal::ONE, Decimal::ZERO).is_none());
/// ```
pub fn share_percent(part: MonetaryValue, whole: MonetaryValue) -> Option<MonetaryValue> {
    if whole.is_zero() {
        return None;
    }

    let mut share = part
        .checked_mul(Decimal::ONE_HUNDRED)?
        .checked_div(whole)?
        .round_dp_with_strategy(LABEL_PERCENT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    share.rescale(LABEL_PERCENT_SCALE);
    Some(share)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_valid() {
        assert_eq!(parse_decimal(LineField::UnitPrice, "10.99").unwrap(), dec!(10.99));
        assert_eq!(parse_decimal(LineField::UnitPrice, "-5").unwrap(), dec!(-5));
        assert_eq!(parse_decimal(LineField::UnitPrice, "0.00").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_keeps_scale() {
        let value = parse_decimal(LineField::DiscountPercent, "12.50").unwrap();
        assert_eq!(value.to_string(), "12.50");
    }

    #[test]
    fn test_parse_rejects_locale_forms() {
        let err = parse_decimal(LineField::PaidTotal, "12,50").unwrap_err();
        assert_eq!(err.field, LineField::PaidTotal);
        assert_eq!(err.value, "12,50");
        assert_eq!(err.reason, "unexpected character ','");

        assert!(parse_decimal(LineField::PaidTotal, "1 000").is_err());
        assert!(parse_decimal(LineField::PaidTotal, "1_000").is_err());
        assert!(parse_decimal(LineField::PaidTotal, "1e3").is_err());
        assert!(parse_decimal(LineField::PaidTotal, "+5").is_err());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(
            parse_decimal(LineField::Quantity, "").unwrap_err().reason,
            "empty string"
        );
        assert!(parse_decimal(LineField::Quantity, "-").is_err());
        assert!(parse_decimal(LineField::Quantity, ".5").is_err());
        assert!(parse_decimal(LineField::Quantity, "5.").is_err());
        assert!(parse_decimal(LineField::Quantity, "1.2.3").is_err());
        assert!(parse_decimal(LineField::Quantity, " 5").is_err());
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(dec!(100), dec!(10)), Some(dec!(10)));
        assert_eq!(percent_of(dec!(90), dec!(10)), Some(dec!(9)));
        assert_eq!(percent_of(dec!(10.00), dec!(8.25)), Some(dec!(0.825)));
    }

    #[test]
    fn test_percent_of_overflow() {
        assert_eq!(percent_of(Decimal::MAX, dec!(200)), None);
        assert_eq!(percent_of(Decimal::MAX, dec!(100)), Some(Decimal::MAX));
    }

    #[test]
    fn test_share_percent_rounding() {
        // 1 / 3 = 33.333..% → 33.33
        assert_eq!(share_percent(dec!(1), dec!(3)).unwrap(), dec!(33.33));
        // 1 / 8 = 12.5% → 12.50
        assert_eq!(share_percent(dec!(1), dec!(8)).unwrap().to_string(), "12.50");
        assert_eq!(share_percent(dec!(5), dec!(0)), None);
    }

    #[test]
    fn test_share_percent_overflow() {
        // part × 100 exceeds Decimal::MAX
        let part = dec!(7922816251426433759354395033);
        assert_eq!(share_percent(part, dec!(1)), None);
    }

    /// 0.1 + 0.2 must be exactly 0.3, unlike f64.
    #[test]
    fn test_no_float_drift() {
        let a = parse_decimal(LineField::UnitPrice, "0.1").unwrap();
        let b = parse_decimal(LineField::UnitPrice, "0.2").unwrap();
        assert_eq!(a + b, dec!(0.3));
    }
}
