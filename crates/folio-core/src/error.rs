//! # Error Types
//!
//! Domain-specific error types for folio-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  folio-core errors (this file)                                         │
//! │  ├── ParseError       - A decimal field is not a valid decimal string   │
//! │  ├── ValidationError  - Structurally inconsistent input                 │
//! │  └── LineError        - Either of the above, optionally with an index   │
//! │                                                                         │
//! │  folio-render errors (separate crate)                                  │
//! │  ├── RenderError      - Row could not be drawn                          │
//! │  └── ConfigError      - Render configuration could not be loaded        │
//! │                                                                         │
//! │  Flow: ParseError / ValidationError → LineError → caller skips/halts   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every error names the field it is about
//! 3. There is no "default to zero" path: a bad field is always an error

use std::fmt;

use thiserror::Error;

// =============================================================================
// Line Field
// =============================================================================

/// Identifies an input field of a line item.
///
/// Rendered with the same dotted names used by the JSON wire format, so an
/// error message points straight at the offending key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineField {
    Name,
    Description,
    UnitPrice,
    Quantity,
    PaidTotal,
    DiscountAmount,
    DiscountPercent,
    TaxAmount,
    TaxPercent,
}

impl LineField {
    /// Returns the wire name of the field.
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineField::Name => "name",
            LineField::Description => "description",
            LineField::UnitPrice => "unit_price",
            LineField::Quantity => "quantity",
            LineField::PaidTotal => "paid_total",
            LineField::DiscountAmount => "discount.amount",
            LineField::DiscountPercent => "discount.percent",
            LineField::TaxAmount => "tax.amount",
            LineField::TaxPercent => "tax.percent",
        }
    }
}

impl fmt::Display for LineField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Parse Error
// =============================================================================

/// A monetary or percentage field is not a valid decimal string.
#[derive(Debug, Error)]
#[error("{field} is not a valid decimal: '{value}' ({reason})")]
pub struct ParseError {
    /// The field that failed to parse.
    pub field: LineField,
    /// The raw text as received.
    pub value: String,
    /// Why the text was rejected.
    pub reason: String,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input that parses but is structurally inconsistent.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: LineField },

    /// Both representations of an adjustment are populated.
    ///
    /// ## When This Occurs
    /// ```text
    /// "discount": { "amount": "5.00", "percent": "10" }
    ///                   │                   │
    ///                   └──── both set ─────┘ → Ambiguous
    /// ```
    #[error("{adjustment} sets both amount and percent")]
    Ambiguous { adjustment: &'static str },

    /// Neither representation of an adjustment is populated.
    #[error("{adjustment} sets neither amount nor percent")]
    Empty { adjustment: &'static str },

    /// A discount or tax magnitude is below zero.
    ///
    /// The sign of an adjustment comes from its kind (a discount subtracts,
    /// a tax adds), never from the input.
    #[error("{field} must not be negative")]
    Negative { field: LineField },

    /// A derived figure does not fit the decimal range.
    ///
    /// ## When This Occurs
    /// ```text
    /// unit_price = 79228162514264337593543950335   (Decimal::MAX)
    /// quantity   = 2
    ///              └── subtotal overflows → Overflow { figure: "subtotal", field: quantity }
    /// ```
    #[error("{figure} overflows the decimal range (check {field})")]
    Overflow {
        figure: &'static str,
        field: LineField,
    },
}

// =============================================================================
// Line Error
// =============================================================================

/// Everything that can go wrong while preparing a line item.
#[derive(Debug, Error)]
pub enum LineError {
    /// A decimal field failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A field or nested adjustment is inconsistent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Failure of a specific item within a batch.
    #[error("item {index} ('{name}'): {source}")]
    Item {
        index: usize,
        name: String,
        #[source]
        source: Box<LineError>,
    },
}

impl LineError {
    /// Returns the field this error is about, looking through batch context.
    pub fn field(&self) -> Option<LineField> {
        match self {
            LineError::Parse(e) => Some(e.field),
            LineError::Validation(
                ValidationError::Required { field }
                | ValidationError::Negative { field }
                | ValidationError::Overflow { field, .. },
            ) => Some(*field),
            LineError::Validation(_) => None,
            LineError::Item { source, .. } => source.field(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with LineError.
pub type LineResult<T> = Result<T, LineError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let err = ParseError {
            field: LineField::UnitPrice,
            value: "12,50".to_string(),
            reason: "unexpected character ','".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unit_price is not a valid decimal: '12,50' (unexpected character ',')"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: LineField::Name,
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Ambiguous {
            adjustment: "discount",
        };
        assert_eq!(err.to_string(), "discount sets both amount and percent");

        let err = ValidationError::Overflow {
            figure: "grand total",
            field: LineField::TaxAmount,
        };
        assert_eq!(
            err.to_string(),
            "grand total overflows the decimal range (check tax.amount)"
        );
    }

    #[test]
    fn test_field_survives_item_context() {
        let inner: LineError = ParseError {
            field: LineField::TaxPercent,
            value: "x".to_string(),
            reason: "unexpected character 'x'".to_string(),
        }
        .into();
        let err = LineError::Item {
            index: 3,
            name: "Consulting".to_string(),
            source: Box::new(inner),
        };
        assert_eq!(err.field(), Some(LineField::TaxPercent));
        assert!(err.to_string().starts_with("item 3 ('Consulting'): tax.percent"));
    }
}
