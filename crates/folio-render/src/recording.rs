//! # Recording Surface
//!
//! An in-memory [`DrawingSurface`] that records every draw call instead of
//! producing a page. Used by tests and by the `folio-rows` binary.
//!
//! ## Text Metrics
//! Every glyph advances by `font_size × GLYPH_WIDTH_RATIO` points. That is
//! coarse compared to real font metrics, but deterministic, and wrapping only
//! needs to be monotonic in text length for row heights to be meaningful.

use serde::Serialize;

use crate::encoding::{Charset, EncodeError};
use crate::surface::{Align, CellSpec, DrawingSurface, Rgb, TextStyle};

/// Average glyph width relative to the font size.
pub const GLYPH_WIDTH_RATIO: f64 = 0.5;

/// Points per millimetre.
pub const PT_PER_MM: f64 = 72.0 / 25.4;

// =============================================================================
// Draw Operations
// =============================================================================

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// A fixed-size cell.
    Cell {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        text: String,
        align: Align,
        border: bool,
        style: TextStyle,
    },
    /// One wrapped line of a multi-line block.
    TextLine {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        text: String,
        style: TextStyle,
    },
}

impl DrawOp {
    pub fn x(&self) -> f64 {
        match self {
            DrawOp::Cell { x, .. } | DrawOp::TextLine { x, .. } => *x,
        }
    }

    pub fn y(&self) -> f64 {
        match self {
            DrawOp::Cell { y, .. } | DrawOp::TextLine { y, .. } => *y,
        }
    }

    pub fn height(&self) -> f64 {
        match self {
            DrawOp::Cell { height, .. } | DrawOp::TextLine { height, .. } => *height,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            DrawOp::Cell { text, .. } | DrawOp::TextLine { text, .. } => text,
        }
    }

    pub fn style(&self) -> &TextStyle {
        match self {
            DrawOp::Cell { style, .. } | DrawOp::TextLine { style, .. } => style,
        }
    }
}

// =============================================================================
// Recording Surface
// =============================================================================

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    x: f64,
    y: f64,
    style: TextStyle,
    charset: Charset,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(charset: Charset, style: TextStyle) -> Self {
        RecordingSurface {
            x: 0.0,
            y: 0.0,
            style,
            charset,
            ops: Vec::new(),
        }
    }

    /// All draw calls so far, in order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Draw calls whose left edge sits at `x`.
    pub fn ops_at_x(&self, x: f64) -> Vec<&DrawOp> {
        self.ops
            .iter()
            .filter(|op| (op.x() - x).abs() < f64::EPSILON)
            .collect()
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    fn glyph_width(&self) -> f64 {
        self.style.size * GLYPH_WIDTH_RATIO / PT_PER_MM
    }
}

impl DrawingSurface for RecordingSurface {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    fn style(&self) -> TextStyle {
        self.style.clone()
    }

    fn set_font(&mut self, family: &str, size: f64) {
        self.style.family = family.to_string();
        self.style.size = size;
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.style.color = color;
    }

    fn multi_cell(&mut self, width: f64, line_height: f64, text: &str) {
        let max_chars = ((width / self.glyph_width()).floor() as usize).max(1);
        for line in wrap_text(text, max_chars) {
            self.ops.push(DrawOp::TextLine {
                x: self.x,
                y: self.y,
                width,
                height: line_height,
                text: line,
                style: self.style.clone(),
            });
            self.y += line_height;
        }
    }

    fn cell(&mut self, cell: &CellSpec<'_>) {
        self.ops.push(DrawOp::Cell {
            x: self.x,
            y: self.y,
            width: cell.width,
            height: cell.height,
            text: cell.text.to_string(),
            align: cell.align,
            border: cell.border,
            style: self.style.clone(),
        });
        self.x += cell.width;
    }

    fn encode(&self, text: &str) -> Result<String, EncodeError> {
        self.charset.encode(text)
    }
}

// =============================================================================
// Wrapping
// =============================================================================

/// Greedy word wrap to at most `max_chars` characters per line.
///
/// Explicit newlines start a new line. Words longer than a line are split.
/// Empty input still yields one (empty) line.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let chars: Vec<char> = word.chars().collect();
            let mut rest: &[char] = &chars;

            while !rest.is_empty() {
                let gap = usize::from(current_len > 0);
                if current_len + gap + rest.len() <= max_chars {
                    if gap == 1 {
                        current.push(' ');
                    }
                    current.extend(rest.iter());
                    current_len += gap + rest.len();
                    break;
                }

                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                    continue;
                }

                // word alone is wider than the column
                let (head, tail) = rest.split_at(max_chars);
                lines.push(head.iter().collect());
                rest = tail;
            }
        }

        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> TextStyle {
        TextStyle {
            family: "Helvetica".to_string(),
            size: 8.0,
            color: Rgb(0, 0, 0),
        }
    }

    #[test]
    fn test_wrap_fits_on_one_line() {
        assert_eq!(wrap_text("short text", 20), vec!["short text"]);
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        assert_eq!(
            wrap_text("the quick brown fox", 10),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn test_wrap_splits_long_words() {
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("ab abcdefgh", 4), vec!["ab", "abcd", "efgh"]);
    }

    #[test]
    fn test_wrap_keeps_newlines_and_empty_input() {
        assert_eq!(wrap_text("one\ntwo", 20), vec!["one", "two"]);
        assert_eq!(wrap_text("", 20), vec![""]);
    }

    #[test]
    fn test_multi_cell_advances_y() {
        let mut surface = RecordingSurface::new(Charset::Unicode, style());
        surface.set_xy(10.0, 20.0);
        // 8pt glyph ≈ 1.41mm, so 14mm holds 9 characters
        surface.multi_cell(14.0, 3.0, "aaaa bbbb cccc");
        assert_eq!(surface.ops().len(), 2);
        assert_eq!(surface.y(), 26.0);
        assert_eq!(surface.ops()[1].y(), 23.0);
        assert_eq!(surface.ops()[1].text(), "cccc");
    }

    #[test]
    fn test_cell_advances_x_only() {
        let mut surface = RecordingSurface::new(Charset::Unicode, style());
        surface.set_xy(10.0, 20.0);
        surface.cell(&CellSpec::new(15.0, 6.0, "12.00"));
        assert_eq!(surface.x(), 25.0);
        assert_eq!(surface.y(), 20.0);
        assert_eq!(surface.ops_at_x(10.0).len(), 1);
    }

    #[test]
    fn test_ops_serialize_with_tag() {
        let mut surface = RecordingSurface::new(Charset::Unicode, style());
        surface.cell(&CellSpec::new(1.0, 1.0, "x"));
        let json = serde_json::to_value(surface.ops()).unwrap();
        assert_eq!(json[0]["op"], "cell");
        assert_eq!(json[0]["align"]["horizontal"], "left");
    }
}
