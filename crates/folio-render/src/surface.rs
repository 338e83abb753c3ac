//! # Drawing Surface
//!
//! The minimal page interface row layout draws against.
//!
//! ## Coordinate Model
//! ```text
//!   (0,0) ──────────────► x (mm)
//!     │
//!     │   cursor (x, y) ┌──────────── width ───────────┐
//!     │                 │ cell / multi_cell text       │ height
//!     ▼ y (mm)          └──────────────────────────────┘
//! ```
//!
//! A surface carries mutable cursor and style state for the whole document.
//! Style changes made while laying out a row go through
//! [`StyleGuard`](crate::guard::StyleGuard) so they never leak.

use serde::{Deserialize, Serialize};

use crate::encoding::EncodeError;

// =============================================================================
// Style
// =============================================================================

/// A text color as three 0-255 channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Font and color state of a surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub family: String,
    /// Font size in points.
    pub size: f64,
    pub color: Rgb,
}

// =============================================================================
// Alignment
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Placement of text inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Align {
    pub horizontal: HAlign,
    pub vertical: VAlign,
}

impl Align {
    pub const LEFT_MIDDLE: Align = Align {
        horizontal: HAlign::Left,
        vertical: VAlign::Middle,
    };
    pub const LEFT_TOP: Align = Align {
        horizontal: HAlign::Left,
        vertical: VAlign::Top,
    };
    pub const LEFT_BOTTOM: Align = Align {
        horizontal: HAlign::Left,
        vertical: VAlign::Bottom,
    };
}

/// A single fixed-size cell, drawn at the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSpec<'a> {
    pub width: f64,
    pub height: f64,
    pub text: &'a str,
    pub align: Align,
    pub border: bool,
}

impl<'a> CellSpec<'a> {
    /// A borderless, left-middle aligned cell.
    pub fn new(width: f64, height: f64, text: &'a str) -> Self {
        CellSpec {
            width,
            height,
            text,
            align: Align::LEFT_MIDDLE,
            border: false,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

// =============================================================================
// Surface Trait
// =============================================================================

/// Page-level drawing primitives.
///
/// ## Cursor Contract
/// - [`cell`](Self::cell) draws at the cursor and moves X right by the cell
///   width; Y is unchanged.
/// - [`multi_cell`](Self::multi_cell) wraps text to `width`, draws one line per
///   `line_height` and leaves Y below the last line.
pub trait DrawingSurface {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
    fn set_x(&mut self, x: f64);
    fn set_y(&mut self, y: f64);

    fn set_xy(&mut self, x: f64, y: f64) {
        self.set_x(x);
        self.set_y(y);
    }

    /// Current font and color.
    fn style(&self) -> TextStyle;
    fn set_font(&mut self, family: &str, size: f64);
    fn set_text_color(&mut self, color: Rgb);

    /// Sets font and color in one go.
    fn apply_style(&mut self, style: &TextStyle) {
        self.set_font(&style.family, style.size);
        self.set_text_color(style.color);
    }

    /// Draws wrapped text bounded by `width`, advancing Y by the consumed height.
    fn multi_cell(&mut self, width: f64, line_height: f64, text: &str);

    /// Draws a single fixed-size cell.
    fn cell(&mut self, cell: &CellSpec<'_>);

    /// Checks text against the output charset.
    fn encode(&self, text: &str) -> Result<String, EncodeError>;
}
