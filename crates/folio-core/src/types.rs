//! # Domain Types
//!
//! Wire and typed representations of an invoice line.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  WIRE (text, serde)                 TYPED (after prepare)               │
//! │  ┌─────────────────┐                ┌─────────────────┐                 │
//! │  │    LineItem     │ ── prepare ──► │  ValidatedLine  │                 │
//! │  │  unit_price: "" │                │  unit_price: D  │                 │
//! │  │  discount ──┐   │                │  discount ──┐   │                 │
//! │  └─────────────┼───┘                └─────────────┼───┘                 │
//! │  ┌─────────────▼───┐                ┌─────────────▼───┐                 │
//! │  │ AdjustmentInput │                │    Discount     │                 │
//! │  │  amount: ""?    │ ── exactly ──► │  AmountOff(D)   │                 │
//! │  │  percent: ""?   │    one set     │  PercentOff(D)  │                 │
//! │  └─────────────────┘                └─────────────────┘                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The wire shape keeps two optional strings because that is what upstream
//! systems send. The typed shape is a sum type, so the inactive
//! representation cannot be read by mistake.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::MonetaryValue;

// =============================================================================
// Wire Types
// =============================================================================

/// A discount or tax as it arrives on the wire.
///
/// Exactly one of `amount` and `percent` must be populated. An empty string
/// counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdjustmentInput {
    /// Flat amount, e.g. `"5.00"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,

    /// Percentage, e.g. `"10"` for 10%.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<String>,
}

impl AdjustmentInput {
    /// Creates an adjustment expressed as a flat amount.
    pub fn amount(amount: impl Into<String>) -> Self {
        AdjustmentInput {
            amount: Some(amount.into()),
            percent: None,
        }
    }

    /// Creates an adjustment expressed as a percentage.
    pub fn percent(percent: impl Into<String>) -> Self {
        AdjustmentInput {
            amount: None,
            percent: Some(percent.into()),
        }
    }
}

/// One invoice line as received from upstream.
///
/// All monetary fields are decimal strings with a period separator.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Product or service name (required).
    pub name: String,

    /// Optional longer description, printed below the name.
    #[serde(default)]
    pub description: String,

    /// Unit price excluding tax.
    pub unit_price: String,

    /// Quantity (may be fractional, e.g. hours).
    pub quantity: String,

    /// Settled total including tax, computed upstream and shown verbatim.
    pub paid_total: String,

    /// Optional discount, applied before tax.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<AdjustmentInput>,

    /// Optional tax, applied to the discounted subtotal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<AdjustmentInput>,
}

// =============================================================================
// Discount
// =============================================================================

/// A validated discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discount {
    /// Flat amount subtracted from the subtotal.
    AmountOff(MonetaryValue),
    /// Percentage of the subtotal subtracted from it.
    PercentOff(MonetaryValue),
}

impl Discount {
    /// Returns the carried magnitude, whichever variant is active.
    #[inline]
    pub fn magnitude(&self) -> MonetaryValue {
        match self {
            Discount::AmountOff(v) | Discount::PercentOff(v) => *v,
        }
    }

    /// A zero discount is rendered like an absent one.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.magnitude().is_zero()
    }
}

// =============================================================================
// Tax
// =============================================================================

/// A validated tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tax {
    /// Flat amount, used verbatim regardless of quantity or discount.
    FixedAmount(MonetaryValue),
    /// Percentage of the discounted subtotal.
    PercentOfBase(MonetaryValue),
}

impl Tax {
    /// Returns the carried magnitude, whichever variant is active.
    #[inline]
    pub fn magnitude(&self) -> MonetaryValue {
        match self {
            Tax::FixedAmount(v) | Tax::PercentOfBase(v) => *v,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_line_item_from_json() {
        let json = r#"{
            "name": "Consulting",
            "unit_price": "150.00",
            "quantity": "2",
            "paid_total": "330.00",
            "tax": { "percent": "10" }
        }"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.name, "Consulting");
        assert_eq!(item.description, "");
        assert!(item.discount.is_none());
        assert_eq!(item.tax, Some(AdjustmentInput::percent("10")));
    }

    #[test]
    fn test_adjustment_serialization_skips_absent() {
        let json = serde_json::to_string(&AdjustmentInput::amount("5.00")).unwrap();
        assert_eq!(json, r#"{"amount":"5.00"}"#);
    }

    #[test]
    fn test_discount_magnitude() {
        assert_eq!(Discount::AmountOff(dec!(5)).magnitude(), dec!(5));
        assert_eq!(Discount::PercentOff(dec!(10)).magnitude(), dec!(10));
        assert!(Discount::AmountOff(dec!(0.00)).is_zero());
        assert!(!Discount::PercentOff(dec!(0.01)).is_zero());
    }

    #[test]
    fn test_tax_magnitude() {
        assert_eq!(Tax::FixedAmount(dec!(5)).magnitude(), dec!(5));
        assert_eq!(Tax::PercentOfBase(dec!(20)).magnitude(), dec!(20));
    }
}
