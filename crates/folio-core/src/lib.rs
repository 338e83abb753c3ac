//! # folio-core: Pure Line Financials for Folio
//!
//! This crate is the **arithmetic heart** of Folio. It turns the text fields
//! of an invoice line into exact decimals and derives the line's totals, as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Folio Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Upstream (JSON line items)                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ LineItem (decimal strings)             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ folio-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   line    │  │ validation│  │   │
//! │  │   │ LineItem  │  │  parsing  │  │  prepare  │  │   name    │  │   │
//! │  │   │ Discount  │  │  percent  │  │  totals   │  │ adjustment│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DRAWING • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ValidatedLine                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 folio-render (Row Layout)                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire types and the typed `Discount` / `Tax` variants
//! - [`money`] - Exact decimal parsing and percentage helpers
//! - [`line`] - `prepare` and the derived totals
//! - [`validation`] - Name and adjustment checks
//! - [`error`] - Parse and validation errors
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every total is a function of the validated line
//! 2. **Parse Once**: Text becomes decimals in `prepare` and nowhere else
//! 3. **Exact Money**: `rust_decimal::Decimal` throughout, never `f64`
//! 4. **Explicit Errors**: A bad field is an error, never a silent zero
//!
//! ## Example Usage
//!
//! ```rust
//! use folio_core::{prepare, AdjustmentInput, LineItem};
//! use rust_decimal::Decimal;
//!
//! let item = LineItem {
//!     name: "Hosting".to_string(),
//!     description: "Monthly plan".to_string(),
//!     unit_price: "50".to_string(),
//!     quantity: "3".to_string(),
//!     paid_total: "155.00".to_string(),
//!     discount: None,
//!     tax: Some(AdjustmentInput::amount("5")),
//! };
//!
//! let line = prepare(&item).unwrap();
//! assert_eq!(line.tax_amount(), Decimal::new(5, 0));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod line;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use folio_core::prepare` instead of
// `use folio_core::line::prepare`

pub use error::{LineError, LineField, LineResult, ParseError, ValidationError};
pub use line::{prepare, prepare_all, LineTotals, ValidatedLine};
pub use money::MonetaryValue;
pub use types::*;
