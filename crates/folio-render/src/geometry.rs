//! # Row Geometry
//!
//! Column boundaries and text styles for one document style.
//!
//! ## Default Columns (mm, A4 portrait)
//! ```text
//!  10        80         103    113         140        163        190
//!  │ name    │ unit     │ qty  │ tax       │ discount │ total    │
//!  │ + desc  │ price    │      │ amt/rate  │ amt/rate │ (paid)   │
//! ```

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::surface::{Rgb, TextStyle};

/// Column offsets, fonts and colors of an item row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderGeometry {
    pub name_offset: f64,
    pub unit_price_offset: f64,
    pub quantity_offset: f64,
    pub tax_offset: f64,
    pub discount_offset: f64,
    pub total_offset: f64,
    /// Right edge of the total column.
    pub right_edge: f64,

    pub font_family: String,
    pub base_font_size: f64,
    /// Size of descriptions and adjustment labels.
    pub small_font_size: f64,
    pub base_text_color: Rgb,
    pub muted_text_color: Rgb,

    /// Height of one wrapped line of name/description text.
    pub line_height: f64,
    /// Vertical space between name and description.
    pub description_gap: f64,
}

impl Default for RenderGeometry {
    fn default() -> Self {
        RenderGeometry {
            name_offset: 10.0,
            unit_price_offset: 80.0,
            quantity_offset: 103.0,
            tax_offset: 113.0,
            discount_offset: 140.0,
            total_offset: 163.0,
            right_edge: 190.0,
            font_family: "Helvetica".to_string(),
            base_font_size: 8.0,
            small_font_size: 7.0,
            base_text_color: Rgb(35, 35, 35),
            muted_text_color: Rgb(82, 82, 82),
            line_height: 3.0,
            description_gap: 1.0,
        }
    }
}

impl RenderGeometry {
    /// Style of names and numeric columns.
    pub fn base_style(&self) -> TextStyle {
        TextStyle {
            family: self.font_family.clone(),
            size: self.base_font_size,
            color: self.base_text_color,
        }
    }

    /// Style of descriptions and adjustment labels.
    pub fn muted_style(&self) -> TextStyle {
        TextStyle {
            family: self.font_family.clone(),
            size: self.small_font_size,
            color: self.muted_text_color,
        }
    }

    pub fn name_width(&self) -> f64 {
        self.unit_price_offset - self.name_offset
    }

    pub fn unit_price_width(&self) -> f64 {
        self.quantity_offset - self.unit_price_offset
    }

    pub fn quantity_width(&self) -> f64 {
        self.tax_offset - self.quantity_offset
    }

    pub fn tax_width(&self) -> f64 {
        self.discount_offset - self.tax_offset
    }

    pub fn discount_width(&self) -> f64 {
        self.total_offset - self.discount_offset
    }

    pub fn total_width(&self) -> f64 {
        self.right_edge - self.total_offset
    }

    /// Checks that columns are ordered and sizes are usable.
    ///
    /// ## Rules
    /// - Offsets strictly increase from name to right edge
    /// - Font sizes and line height are positive
    /// - Description gap is not negative
    /// - Font family is not blank
    pub fn validate(&self) -> Result<(), GeometryError> {
        let offsets = [
            ("name_offset", self.name_offset),
            ("unit_price_offset", self.unit_price_offset),
            ("quantity_offset", self.quantity_offset),
            ("tax_offset", self.tax_offset),
            ("discount_offset", self.discount_offset),
            ("total_offset", self.total_offset),
            ("right_edge", self.right_edge),
        ];

        if let Some((name, value)) = offsets.iter().find(|(_, v)| !v.is_finite()) {
            return Err(GeometryError(format!("{} is not finite: {}", name, value)));
        }

        for pair in offsets.windows(2) {
            let (left, left_value) = pair[0];
            let (right, right_value) = pair[1];
            if right_value <= left_value {
                return Err(GeometryError(format!(
                    "{} ({}) must be greater than {} ({})",
                    right, right_value, left, left_value
                )));
            }
        }

        for (name, value) in [
            ("base_font_size", self.base_font_size),
            ("small_font_size", self.small_font_size),
            ("line_height", self.line_height),
        ] {
            if !(value > 0.0) {
                return Err(GeometryError(format!("{} must be positive", name)));
            }
        }

        if !(self.description_gap >= 0.0) {
            return Err(GeometryError("description_gap must not be negative".into()));
        }

        if self.font_family.trim().is_empty() {
            return Err(GeometryError("font_family is required".into()));
        }

        Ok(())
    }
}
