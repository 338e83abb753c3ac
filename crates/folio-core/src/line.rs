//! # Line Financials
//!
//! Turns a wire [`LineItem`] into an immutable [`ValidatedLine`] and derives
//! its totals.
//!
//! ## Computation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  unit_price × quantity                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subtotal (excl. tax, excl. discount)                                   │
//! │       │                                                                 │
//! │       ▼  − AmountOff(a)            → subtotal − a                       │
//! │       ▼  − PercentOff(p)           → subtotal − subtotal × p/100        │
//! │  subtotal (excl. tax, incl. discount)                                   │
//! │       │                                                                 │
//! │       ▼  + FixedAmount(t)          → t                                  │
//! │       ▼  + PercentOfBase(p)        → discounted × p/100                 │
//! │  grand total                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Discount is always applied before tax. An amount discount larger than the
//! subtotal is not clamped; the subtotal goes negative.
//!
//! ## Example
//! ```rust
//! use folio_core::line::prepare;
//! use folio_core::types::{AdjustmentInput, LineItem};
//! use rust_decimal::Decimal;
//!
//! let item = LineItem {
//!     name: "Widget".to_string(),
//!     description: String::new(),
//!     unit_price: "100".to_string(),
//!     quantity: "1".to_string(),
//!     paid_total: "99.00".to_string(),
//!     discount: Some(AdjustmentInput::percent("10")),
//!     tax: Some(AdjustmentInput::percent("10")),
//! };
//!
//! let line = prepare(&item).unwrap();
//! assert_eq!(line.subtotal_excl_tax_incl_discount(), Decimal::new(90, 0));
//! assert_eq!(line.tax_amount(), Decimal::new(9, 0));
//! assert_eq!(line.grand_total(), Decimal::new(99, 0));
//! ```

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::error::{LineError, LineField, LineResult, ValidationError};
use crate::money::{parse_decimal, percent_of, share_percent, MonetaryValue};
use crate::types::{Discount, LineItem, Tax};
use crate::validation::{validate_discount, validate_name, validate_tax};

// =============================================================================
// Validated Line
// =============================================================================

/// A fully parsed, immutable invoice line.
///
/// Only [`prepare`] constructs one, so holding a `ValidatedLine` proves every
/// decimal field parsed, every adjustment is consistent and every derived
/// figure fits the decimal range.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedLine {
    name: String,
    description: String,
    unit_price: MonetaryValue,
    quantity: MonetaryValue,
    paid_total: MonetaryValue,
    discount: Option<Discount>,
    tax: Option<Tax>,
    figures: Figures,
}

/// Derived figures, computed once with checked arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Figures {
    subtotal: MonetaryValue,
    discount_amount: MonetaryValue,
    discounted: MonetaryValue,
    tax_amount: MonetaryValue,
    grand_total: MonetaryValue,
}

fn overflow(figure: &'static str, field: LineField) -> LineError {
    ValidationError::Overflow { figure, field }.into()
}

impl Figures {
    fn derive(
        unit_price: MonetaryValue,
        quantity: MonetaryValue,
        discount: Option<Discount>,
        tax: Option<Tax>,
    ) -> LineResult<Self> {
        let subtotal = unit_price
            .checked_mul(quantity)
            .ok_or_else(|| overflow("subtotal", LineField::Quantity))?;

        let discount_amount = match discount {
            None => Decimal::ZERO,
            Some(Discount::AmountOff(amount)) => amount,
            Some(Discount::PercentOff(percent)) => percent_of(subtotal, percent)
                .ok_or_else(|| overflow("discount amount", LineField::DiscountPercent))?,
        };
        let discount_field = match discount {
            Some(Discount::PercentOff(_)) => LineField::DiscountPercent,
            _ => LineField::DiscountAmount,
        };
        let discounted = subtotal
            .checked_sub(discount_amount)
            .ok_or_else(|| overflow("discounted subtotal", discount_field))?;

        let tax_amount = match tax {
            None => Decimal::ZERO,
            Some(Tax::FixedAmount(amount)) => amount,
            Some(Tax::PercentOfBase(percent)) => percent_of(discounted, percent)
                .ok_or_else(|| overflow("tax amount", LineField::TaxPercent))?,
        };
        let tax_field = match tax {
            Some(Tax::PercentOfBase(_)) => LineField::TaxPercent,
            _ => LineField::TaxAmount,
        };
        let grand_total = discounted
            .checked_add(tax_amount)
            .ok_or_else(|| overflow("grand total", tax_field))?;

        Ok(Figures {
            subtotal,
            discount_amount,
            discounted,
            tax_amount,
            grand_total,
        })
    }
}

/// Parses and validates a line item.
///
/// Fails fast on the first bad field, in wire order: name, unit price,
/// quantity, paid total, discount, tax. Derived totals are computed here too,
/// so a figure that would overflow the decimal range is a
/// [`ValidationError::Overflow`] rather than a panic later on.
pub fn prepare(item: &LineItem) -> LineResult<ValidatedLine> {
    validate_name(&item.name)?;

    let unit_price = parse_decimal(LineField::UnitPrice, &item.unit_price)?;
    let quantity = parse_decimal(LineField::Quantity, &item.quantity)?;
    let paid_total = parse_decimal(LineField::PaidTotal, &item.paid_total)?;
    let discount = item.discount.as_ref().map(validate_discount).transpose()?;
    let tax = item.tax.as_ref().map(validate_tax).transpose()?;
    let figures = Figures::derive(unit_price, quantity, discount, tax)?;

    debug!(
        name = %item.name,
        %unit_price,
        %quantity,
        ?discount,
        ?tax,
        grand_total = %figures.grand_total,
        "Prepared line item"
    );

    Ok(ValidatedLine {
        name: item.name.clone(),
        description: item.description.clone(),
        unit_price,
        quantity,
        paid_total,
        discount,
        tax,
        figures,
    })
}

/// Prepares a batch of items, stopping at the first failure.
///
/// The error carries the index and name of the offending item so the caller
/// can report or skip it.
pub fn prepare_all(items: &[LineItem]) -> LineResult<Vec<ValidatedLine>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            prepare(item).map_err(|e| LineError::Item {
                index,
                name: item.name.clone(),
                source: Box::new(e),
            })
        })
        .collect()
}

impl ValidatedLine {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn unit_price(&self) -> MonetaryValue {
        self.unit_price
    }

    pub fn quantity(&self) -> MonetaryValue {
        self.quantity
    }

    /// The upstream-settled total. Displayed as-is, never recomputed.
    pub fn paid_total(&self) -> MonetaryValue {
        self.paid_total
    }

    pub fn discount(&self) -> Option<Discount> {
        self.discount
    }

    pub fn tax(&self) -> Option<Tax> {
        self.tax
    }

    // =========================================================================
    // Totals
    // =========================================================================

    /// `unit_price × quantity`.
    pub fn subtotal_excl_tax_excl_discount(&self) -> MonetaryValue {
        self.figures.subtotal
    }

    /// The subtotal with the discount applied. Not clamped at zero.
    pub fn subtotal_excl_tax_incl_discount(&self) -> MonetaryValue {
        self.figures.discounted
    }

    /// How much the discount takes off the subtotal.
    pub fn discount_amount(&self) -> MonetaryValue {
        self.figures.discount_amount
    }

    /// Tax charged on the discounted subtotal.
    pub fn tax_amount(&self) -> MonetaryValue {
        self.figures.tax_amount
    }

    pub fn grand_total(&self) -> MonetaryValue {
        self.figures.grand_total
    }

    // =========================================================================
    // Percentage Labels
    // =========================================================================

    /// The discount as a percentage of the undiscounted subtotal.
    ///
    /// A percent discount returns its own rate. An amount discount returns its
    /// effective share, or `None` when the subtotal is zero.
    pub fn discount_percent(&self) -> Option<MonetaryValue> {
        match self.discount? {
            Discount::PercentOff(percent) => Some(percent),
            Discount::AmountOff(amount) => {
                share_percent(amount, self.subtotal_excl_tax_excl_discount())
            }
        }
    }

    /// The tax as a percentage of the discounted subtotal.
    pub fn tax_percent(&self) -> Option<MonetaryValue> {
        match self.tax? {
            Tax::PercentOfBase(percent) => Some(percent),
            Tax::FixedAmount(amount) => share_percent(amount, self.subtotal_excl_tax_incl_discount()),
        }
    }

    /// Snapshot of every derived figure, for reporting.
    pub fn totals(&self) -> LineTotals {
        LineTotals {
            name: self.name.clone(),
            subtotal_excl_tax_excl_discount: self.subtotal_excl_tax_excl_discount(),
            subtotal_excl_tax_incl_discount: self.subtotal_excl_tax_incl_discount(),
            tax_amount: self.tax_amount(),
            grand_total: self.grand_total(),
            paid_total: self.paid_total,
        }
    }
}

// =============================================================================
// Line Totals
// =============================================================================

/// Derived figures of one line. Decimals serialize as strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineTotals {
    pub name: String,
    pub subtotal_excl_tax_excl_discount: MonetaryValue,
    pub subtotal_excl_tax_incl_discount: MonetaryValue,
    pub tax_amount: MonetaryValue,
    pub grand_total: MonetaryValue,
    pub paid_total: MonetaryValue,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AdjustmentInput;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn item(price: &str, quantity: &str) -> LineItem {
        LineItem {
            name: "Widget".to_string(),
            description: String::new(),
            unit_price: price.to_string(),
            quantity: quantity.to_string(),
            paid_total: "0.00".to_string(),
            discount: None,
            tax: None,
        }
    }

    #[test]
    fn test_subtotal() {
        let line = prepare(&item("2.99", "3")).unwrap();
        assert_eq!(line.subtotal_excl_tax_excl_discount(), dec!(8.97));
    }

    #[test]
    fn test_discount_before_tax() {
        let mut it = item("100", "1");
        it.discount = Some(AdjustmentInput::percent("10"));
        it.tax = Some(AdjustmentInput::percent("10"));
        let line = prepare(&it).unwrap();

        assert_eq!(line.subtotal_excl_tax_incl_discount(), dec!(90));
        assert_eq!(line.tax_amount(), dec!(9));
        assert_eq!(line.grand_total(), dec!(99));
    }

    #[test]
    fn test_absent_adjustments() {
        let line = prepare(&item("12.50", "4")).unwrap();
        assert_eq!(
            line.subtotal_excl_tax_incl_discount(),
            line.subtotal_excl_tax_excl_discount()
        );
        assert_eq!(line.tax_amount(), Decimal::ZERO);
        assert_eq!(line.discount_amount(), Decimal::ZERO);
        assert_eq!(line.grand_total(), dec!(50));
        assert_eq!(line.discount_percent(), None);
        assert_eq!(line.tax_percent(), None);
    }

    #[test]
    fn test_fixed_tax_ignores_quantity() {
        let mut it = item("50", "3");
        it.tax = Some(AdjustmentInput::amount("5"));
        let line = prepare(&it).unwrap();

        assert_eq!(line.tax_amount(), dec!(5));
        assert_eq!(line.grand_total(), dec!(155));
    }

    #[test]
    fn test_amount_discount_is_not_clamped() {
        let mut it = item("10", "1");
        it.discount = Some(AdjustmentInput::amount("25"));
        let line = prepare(&it).unwrap();

        assert_eq!(line.subtotal_excl_tax_incl_discount(), dec!(-15));
        assert_eq!(line.discount_amount(), dec!(25));
    }

    #[test]
    fn test_effective_percent_labels() {
        let mut it = item("40", "1");
        it.discount = Some(AdjustmentInput::amount("5"));
        it.tax = Some(AdjustmentInput::amount("7"));
        let line = prepare(&it).unwrap();

        // 5 of 40 → 12.50 %, 7 of 35 → 20.00 %
        assert_eq!(line.discount_percent().unwrap().to_string(), "12.50");
        assert_eq!(line.tax_percent().unwrap().to_string(), "20.00");
    }

    #[test]
    fn test_effective_percent_on_zero_base() {
        let mut it = item("0", "1");
        it.discount = Some(AdjustmentInput::amount("5"));
        let line = prepare(&it).unwrap();
        assert_eq!(line.discount_percent(), None);
    }

    #[test]
    fn test_paid_total_is_verbatim() {
        let mut it = item("33.33", "3");
        it.paid_total = "100.00".to_string();
        let line = prepare(&it).unwrap();

        assert_eq!(line.grand_total(), dec!(99.99));
        assert_eq!(line.paid_total(), dec!(100.00));
        assert_eq!(line.totals().paid_total, dec!(100.00));
    }

    #[test]
    fn test_prepare_rejects_comma_decimal() {
        for field in [LineField::UnitPrice, LineField::Quantity, LineField::PaidTotal] {
            let mut it = item("1", "1");
            match field {
                LineField::UnitPrice => it.unit_price = "12,50".to_string(),
                LineField::Quantity => it.quantity = "12,50".to_string(),
                _ => it.paid_total = "12,50".to_string(),
            }
            let err = prepare(&it).unwrap_err();
            assert!(matches!(err, LineError::Parse(_)));
            assert_eq!(err.field(), Some(field));
        }
    }

    #[test]
    fn test_prepare_requires_name() {
        let mut it = item("1", "1");
        it.name = "  ".to_string();
        assert!(matches!(
            prepare(&it).unwrap_err(),
            LineError::Validation(ValidationError::Required {
                field: LineField::Name
            })
        ));
    }

    #[test]
    fn test_prepare_all_reports_index() {
        let mut bad = item("1", "1");
        bad.name = "Broken".to_string();
        bad.tax = Some(AdjustmentInput::percent("7,5"));
        let items = vec![item("1", "1"), bad];

        match prepare_all(&items).unwrap_err() {
            LineError::Item { index, name, source } => {
                assert_eq!(index, 1);
                assert_eq!(name, "Broken");
                assert_eq!(source.field(), Some(LineField::TaxPercent));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_totals_serialize_as_strings() {
        let line = prepare(&item("1.50", "2")).unwrap();
        let json = serde_json::to_value(line.totals()).unwrap();
        assert_eq!(json["subtotal_excl_tax_excl_discount"], "3.00");
        assert_eq!(json["name"], "Widget");
    }

    const MAX_PRICE: &str = "79228162514264337593543950335";

    fn overflow_of(err: LineError) -> (&'static str, LineField) {
        match err {
            LineError::Validation(ValidationError::Overflow { figure, field }) => (figure, field),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_subtotal_overflow_is_an_error() {
        let err = prepare(&item(MAX_PRICE, "2")).unwrap_err();
        assert_eq!(err.field(), Some(LineField::Quantity));
        assert_eq!(overflow_of(err), ("subtotal", LineField::Quantity));
    }

    #[test]
    fn test_tax_and_grand_total_overflow_are_errors() {
        let mut it = item(MAX_PRICE, "1");
        it.tax = Some(AdjustmentInput::percent("200"));
        assert_eq!(
            overflow_of(prepare(&it).unwrap_err()),
            ("tax amount", LineField::TaxPercent)
        );

        it.tax = Some(AdjustmentInput::amount("1"));
        assert_eq!(
            overflow_of(prepare(&it).unwrap_err()),
            ("grand total", LineField::TaxAmount)
        );
    }

    #[test]
    fn test_largest_subtotal_still_prepares() {
        let line = prepare(&item(MAX_PRICE, "1")).unwrap();
        assert_eq!(line.subtotal_excl_tax_excl_discount(), Decimal::MAX);
        assert_eq!(line.totals().grand_total, Decimal::MAX);
    }

    #[test]
    fn test_huge_amount_discount_has_no_label() {
        let mut it = item("1", "1");
        it.discount = Some(AdjustmentInput::amount("7922816251426433759354395033"));
        let line = prepare(&it).unwrap();

        assert_eq!(line.discount_amount(), dec!(7922816251426433759354395033));
        assert_eq!(line.discount_percent(), None);
    }

    fn cents() -> impl Strategy<Value = Decimal> {
        (0i64..10_000_000).prop_map(|c| Decimal::new(c, 2))
    }

    proptest! {
        #[test]
        fn prop_subtotal_is_exact_product(price in cents(), quantity in cents()) {
            let line = prepare(&item(&price.to_string(), &quantity.to_string())).unwrap();
            prop_assert_eq!(line.subtotal_excl_tax_excl_discount(), price * quantity);
        }

        #[test]
        fn prop_tax_uses_discounted_base(
            price in cents(),
            discount in 0u32..=100,
            rate in 0u32..=30,
        ) {
            let mut it = item(&price.to_string(), "1");
            it.discount = Some(AdjustmentInput::percent(discount.to_string()));
            it.tax = Some(AdjustmentInput::percent(rate.to_string()));
            let line = prepare(&it).unwrap();

            let discounted = line.subtotal_excl_tax_incl_discount();
            prop_assert_eq!(
                Some(line.tax_amount()),
                percent_of(discounted, Decimal::from(rate))
            );
            prop_assert_eq!(line.grand_total(), discounted + line.tax_amount());
            prop_assert!(discounted <= line.subtotal_excl_tax_excl_discount());
        }
    }
}
