//! # folio-render: Row Layout for Folio
//!
//! Lays out validated invoice lines as rows of fixed columns on an abstract
//! drawing surface.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   folio-core::ValidatedLine ──┐                                         │
//! │                               ▼                                         │
//! │   RenderConfig ───────► ★ RowLayout (THIS CRATE) ★                      │
//! │   (geometry, money,           │                                         │
//! │    charset)                   │  cell / multi_cell / set_font …         │
//! │                               ▼                                         │
//! │                 dyn DrawingSurface (PDF backend, RecordingSurface)      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`layout`] - `RowLayout`, the row state machine
//! - [`surface`] - `DrawingSurface` trait and style types
//! - [`guard`] - `StyleGuard`, scoped style mutation
//! - [`recording`] - In-memory surface that records draw calls
//! - [`money_format`] - `MoneyFormatter` and `AccountingFormat`
//! - [`geometry`] - Column offsets and text styles
//! - [`encoding`] - Output charset checks
//! - [`config`] - TOML + environment configuration
//! - [`error`] - Render and config errors
//!
//! ## Example Usage
//!
//! ```rust
//! use folio_core::{prepare, LineItem};
//! use folio_render::{
//!     AccountingFormat, Charset, DrawingSurface, RecordingSurface, RenderGeometry, RowLayout,
//! };
//!
//! let item = LineItem {
//!     name: "Widget".to_string(),
//!     description: String::new(),
//!     unit_price: "10".to_string(),
//!     quantity: "2".to_string(),
//!     paid_total: "20.00".to_string(),
//!     discount: None,
//!     tax: None,
//! };
//! let line = prepare(&item).unwrap();
//!
//! let geometry = RenderGeometry::default();
//! let money = AccountingFormat::default();
//! let layout = RowLayout::new(&geometry, &money).unwrap();
//!
//! let mut surface = RecordingSurface::new(Charset::WinAnsi, geometry.base_style());
//! surface.set_y(40.0);
//! let extent = layout.layout(&mut surface, &line).unwrap();
//! assert_eq!(surface.y(), extent.next_y);
//! ```

pub mod config;
pub mod encoding;
pub mod error;
pub mod geometry;
pub mod guard;
pub mod layout;
pub mod money_format;
pub mod recording;
pub mod surface;

pub use config::RenderConfig;
pub use encoding::{Charset, EncodeError};
pub use error::{ConfigError, GeometryError, RenderError, RenderResult};
pub use geometry::RenderGeometry;
pub use guard::StyleGuard;
pub use layout::{RowExtent, RowLayout, PLACEHOLDER};
pub use money_format::{AccountingFormat, MoneyFormatter};
pub use recording::{DrawOp, RecordingSurface};
pub use surface::{Align, CellSpec, DrawingSurface, HAlign, Rgb, TextStyle, VAlign};
