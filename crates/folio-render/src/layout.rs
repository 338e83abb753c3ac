//! # Row Layout
//!
//! Draws one validated invoice line as a single row of fixed columns.
//!
//! ## Row Anatomy
//! ```text
//!  base_y ─┬─────────────────┬───────┬─────┬───────────┬───────────┬────────┐
//!          │ Name wrapped    │       │     │ 9,00 €    │ - 10,00 € │        │
//!          │ over lines      │ 100 € │  1  │───────────│───────────│ 99 €   │ col_height
//!          │  description    │       │     │ 10 %      │ 10 %      │        │
//!  next_y ─┴─────────────────┴───────┴─────┴───────────┴───────────┴────────┘
//!            measure phase    full-height   two half-height sub-cells  paid
//! ```
//!
//! ## Height Reconciliation
//! Only wrapped name and description text decide `col_height`. Every numeric
//! column is drawn into that height afterwards; none of them can grow the row.
//!
//! ## Failure Model
//! All cell texts are formatted and charset-checked before the first draw
//! call, so a line that cannot be encoded leaves nothing half-drawn.

use folio_core::{LineField, MonetaryValue, ValidatedLine};
use serde::Serialize;
use tracing::debug;

use crate::error::{GeometryError, RenderError, RenderResult};
use crate::geometry::RenderGeometry;
use crate::guard::StyleGuard;
use crate::money_format::MoneyFormatter;
use crate::surface::{Align, CellSpec, DrawingSurface};

/// Text of a column with no discount or tax.
pub const PLACEHOLDER: &str = "--";

/// Vertical space a row consumed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowExtent {
    pub base_y: f64,
    pub col_height: f64,
    /// Where the next row starts: `base_y + col_height`.
    pub next_y: f64,
}

// =============================================================================
// Prepared Texts
// =============================================================================

/// Content of the discount or tax column.
#[derive(Debug, Clone, PartialEq)]
enum AdjustmentCell {
    Placeholder(String),
    Split { amount: String, label: String },
}

/// Every string of a row, formatted and encoded.
#[derive(Debug)]
struct RowTexts {
    name: String,
    description: Option<String>,
    unit_price: String,
    quantity: String,
    discount: AdjustmentCell,
    tax: AdjustmentCell,
    total: String,
}

fn percent_label(percent: Option<MonetaryValue>) -> String {
    match percent {
        Some(p) => format!("{} %", p),
        None => PLACEHOLDER.to_string(),
    }
}

// =============================================================================
// Row Layout
// =============================================================================

/// Lays out rows with a fixed geometry and money formatter.
pub struct RowLayout<'a> {
    geometry: &'a RenderGeometry,
    formatter: &'a dyn MoneyFormatter,
}

impl<'a> RowLayout<'a> {
    /// Creates a layout, rejecting geometry that cannot form a row.
    pub fn new(
        geometry: &'a RenderGeometry,
        formatter: &'a dyn MoneyFormatter,
    ) -> Result<Self, GeometryError> {
        geometry.validate()?;
        Ok(RowLayout {
            geometry,
            formatter,
        })
    }

    pub fn geometry(&self) -> &RenderGeometry {
        self.geometry
    }

    /// Draws `line` at the surface's current Y and moves Y below the row.
    ///
    /// The surface's style is the same after the call as before it, on
    /// success and on error.
    pub fn layout<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        line: &ValidatedLine,
    ) -> RenderResult<RowExtent> {
        let texts = self.prepare_texts(&*surface, line)?;
        let g = self.geometry;
        let base_y = surface.y();

        let mut row = StyleGuard::acquire(surface);
        row.apply_style(&g.base_style());

        // 1. Measure phase: wrapped name, then description
        row.set_xy(g.name_offset, base_y);
        row.multi_cell(g.name_width(), g.line_height, &texts.name);

        if let Some(description) = &texts.description {
            let y = row.y() + g.description_gap;
            let mut muted = StyleGuard::acquire(&mut *row);
            muted.apply_style(&g.muted_style());
            muted.set_xy(g.name_offset, y);
            muted.multi_cell(g.name_width(), g.line_height, description);
        }

        let col_height = row.y() - base_y;

        // 2. Fixed-height columns
        row.set_xy(g.unit_price_offset, base_y);
        row.cell(&CellSpec::new(g.unit_price_width(), col_height, &texts.unit_price));
        row.set_x(g.quantity_offset);
        row.cell(&CellSpec::new(g.quantity_width(), col_height, &texts.quantity));

        // 3. Discount, 4. Tax
        self.draw_adjustment(
            &mut *row,
            g.discount_offset,
            g.discount_width(),
            base_y,
            col_height,
            &texts.discount,
            Align::LEFT_MIDDLE,
        );
        self.draw_adjustment(
            &mut *row,
            g.tax_offset,
            g.tax_width(),
            base_y,
            col_height,
            &texts.tax,
            Align::LEFT_BOTTOM,
        );

        // 5. Settled total, shown verbatim
        row.set_xy(g.total_offset, base_y);
        row.cell(&CellSpec::new(g.total_width(), col_height, &texts.total));

        // 6. Next row starts right below
        let next_y = base_y + col_height;
        row.set_y(next_y);

        debug!(line = line.name(), base_y, col_height, "Laid out row");

        Ok(RowExtent {
            base_y,
            col_height,
            next_y,
        })
    }

    /// Lays out several lines top to bottom, stopping at the first failure.
    pub fn layout_all<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        lines: &[ValidatedLine],
    ) -> RenderResult<Vec<RowExtent>> {
        lines.iter().map(|line| self.layout(surface, line)).collect()
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_adjustment<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        x: f64,
        width: f64,
        base_y: f64,
        col_height: f64,
        cell: &AdjustmentCell,
        amount_align: Align,
    ) {
        surface.set_xy(x, base_y);
        match cell {
            AdjustmentCell::Placeholder(text) => {
                surface.cell(&CellSpec::new(width, col_height, text));
            }
            AdjustmentCell::Split { amount, label } => {
                let half = col_height / 2.0;
                surface.cell(&CellSpec::new(width, half, amount).align(amount_align));

                let mut muted = StyleGuard::acquire(surface);
                muted.apply_style(&self.geometry.muted_style());
                muted.set_xy(x, base_y + half);
                muted.cell(&CellSpec::new(width, half, label).align(Align::LEFT_TOP));
                muted.set_y(base_y);
            }
        }
    }

    fn prepare_texts<S: DrawingSurface + ?Sized>(
        &self,
        surface: &S,
        line: &ValidatedLine,
    ) -> RenderResult<RowTexts> {
        let encode = |field: LineField, text: &str| {
            surface.encode(text).map_err(|source| RenderError::Encoding {
                line: line.name().to_string(),
                field,
                source,
            })
        };
        let money = |value: MonetaryValue| self.formatter.format_money(value);

        let description = match line.description() {
            "" => None,
            text => Some(encode(LineField::Description, text)?),
        };

        let discount = match line.discount() {
            Some(discount) if !discount.is_zero() => AdjustmentCell::Split {
                amount: encode(
                    LineField::DiscountAmount,
                    &format!("- {}", money(line.discount_amount())),
                )?,
                label: encode(
                    LineField::DiscountPercent,
                    &percent_label(line.discount_percent()),
                )?,
            },
            _ => AdjustmentCell::Placeholder(encode(LineField::DiscountAmount, PLACEHOLDER)?),
        };

        let tax = match line.tax() {
            Some(_) => AdjustmentCell::Split {
                amount: encode(LineField::TaxAmount, &money(line.tax_amount()))?,
                label: encode(LineField::TaxPercent, &percent_label(line.tax_percent()))?,
            },
            None => AdjustmentCell::Placeholder(encode(LineField::TaxAmount, PLACEHOLDER)?),
        };

        Ok(RowTexts {
            name: encode(LineField::Name, line.name())?,
            description,
            unit_price: encode(LineField::UnitPrice, &money(line.unit_price()))?,
            quantity: encode(
                LineField::Quantity,
                &self.formatter.format_number(line.quantity()),
            )?,
            discount,
            tax,
            total: encode(LineField::PaidTotal, &money(line.paid_total()))?,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
