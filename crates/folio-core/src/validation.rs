//! # Validation Module
//!
//! Input validation for line items.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  └── Required keys present, every value is a string                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Name is not blank                                                 │
//! │  ├── Adjustments have exactly one representation                       │
//! │  └── Adjustment magnitudes are not negative                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: money::parse_decimal                                         │
//! │  └── Each decimal string parses exactly                                │
//! │                                                                         │
//! │  Nothing downstream of prepare ever sees raw text                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{LineField, LineResult, ValidationError};
use crate::money::{parse_decimal, MonetaryValue};
use crate::types::{AdjustmentInput, Discount, Tax};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a line name.
///
/// ## Rules
/// - Must not be empty or whitespace only
///
/// ## Example
/// ```rust
/// use folio_core::validation::validate_name;
///
/// assert!(validate_name("Consulting").is_ok());
/// assert!(validate_name("   ").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: LineField::Name,
        });
    }

    Ok(())
}

// =============================================================================
// Adjustment Validators
// =============================================================================

enum Representation {
    Amount(MonetaryValue),
    Percent(MonetaryValue),
}

fn populated(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn magnitude(field: LineField, text: &str) -> LineResult<MonetaryValue> {
    let value = parse_decimal(field, text)?;
    if value < MonetaryValue::ZERO {
        return Err(ValidationError::Negative { field }.into());
    }
    Ok(value)
}

fn representation(
    input: &AdjustmentInput,
    adjustment: &'static str,
    amount_field: LineField,
    percent_field: LineField,
) -> LineResult<Representation> {
    match (populated(&input.amount), populated(&input.percent)) {
        (Some(_), Some(_)) => Err(ValidationError::Ambiguous { adjustment }.into()),
        (None, None) => Err(ValidationError::Empty { adjustment }.into()),
        (Some(amount), None) => Ok(Representation::Amount(magnitude(amount_field, amount)?)),
        (None, Some(percent)) => Ok(Representation::Percent(magnitude(percent_field, percent)?)),
    }
}

/// Validates a discount input and returns the typed discount.
///
/// ## Rules
/// - Exactly one of `amount` / `percent` is set (empty counts as unset)
/// - The value parses and is not negative
///
/// ## Example
/// ```rust
/// use folio_core::types::{AdjustmentInput, Discount};
/// use folio_core::validation::validate_discount;
/// use rust_decimal::Decimal;
///
/// let discount = validate_discount(&AdjustmentInput::percent("10")).unwrap();
/// assert_eq!(discount, Discount::PercentOff(Decimal::new(10, 0)));
///
/// assert!(validate_discount(&AdjustmentInput::default()).is_err());
/// ```
pub fn validate_discount(input: &AdjustmentInput) -> LineResult<Discount> {
    let discount = match representation(
        input,
        "discount",
        LineField::DiscountAmount,
        LineField::DiscountPercent,
    )? {
        Representation::Amount(v) => Discount::AmountOff(v),
        Representation::Percent(v) => Discount::PercentOff(v),
    };
    Ok(discount)
}

/// Validates a tax input and returns the typed tax.
pub fn validate_tax(input: &AdjustmentInput) -> LineResult<Tax> {
    let tax = match representation(input, "tax", LineField::TaxAmount, LineField::TaxPercent)? {
        Representation::Amount(v) => Tax::FixedAmount(v),
        Representation::Percent(v) => Tax::PercentOfBase(v),
    };
    Ok(tax)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LineError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Consulting").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name(" \t").is_err());
    }

    #[test]
    fn test_validate_discount_variants() {
        assert_eq!(
            validate_discount(&AdjustmentInput::amount("5.00")).unwrap(),
            Discount::AmountOff(dec!(5.00))
        );
        assert_eq!(
            validate_discount(&AdjustmentInput::percent("12.5")).unwrap(),
            Discount::PercentOff(dec!(12.5))
        );
    }

    #[test]
    fn test_validate_tax_variants() {
        assert_eq!(
            validate_tax(&AdjustmentInput::amount("5")).unwrap(),
            Tax::FixedAmount(dec!(5))
        );
        assert_eq!(
            validate_tax(&AdjustmentInput::percent("20")).unwrap(),
            Tax::PercentOfBase(dec!(20))
        );
    }

    #[test]
    fn test_both_representations_rejected() {
        let input = AdjustmentInput {
            amount: Some("5".to_string()),
            percent: Some("10".to_string()),
        };
        let err = validate_discount(&input).unwrap_err();
        assert!(matches!(
            err,
            LineError::Validation(ValidationError::Ambiguous {
                adjustment: "discount"
            })
        ));
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let input = AdjustmentInput {
            amount: Some(String::new()),
            percent: Some("10".to_string()),
        };
        assert_eq!(validate_tax(&input).unwrap(), Tax::PercentOfBase(dec!(10)));

        let input = AdjustmentInput {
            amount: Some(String::new()),
            percent: None,
        };
        assert!(matches!(
            validate_tax(&input).unwrap_err(),
            LineError::Validation(ValidationError::Empty { adjustment: "tax" })
        ));
    }

    #[test]
    fn test_parse_failure_names_nested_field() {
        let err = validate_tax(&AdjustmentInput::percent("7,5")).unwrap_err();
        assert_eq!(err.field(), Some(LineField::TaxPercent));

        let err = validate_discount(&AdjustmentInput::amount("abc")).unwrap_err();
        assert_eq!(err.field(), Some(LineField::DiscountAmount));
    }

    #[test]
    fn test_negative_magnitudes_rejected() {
        let err = validate_discount(&AdjustmentInput::amount("-5.00")).unwrap_err();
        assert!(matches!(
            err,
            LineError::Validation(ValidationError::Negative {
                field: LineField::DiscountAmount
            })
        ));

        let err = validate_tax(&AdjustmentInput::percent("-10")).unwrap_err();
        assert_eq!(err.field(), Some(LineField::TaxPercent));

        // negative zero is still zero
        assert_eq!(
            validate_discount(&AdjustmentInput::amount("-0")).unwrap(),
            Discount::AmountOff(dec!(0))
        );
    }
}
