//! # Row Layout Runner
//!
//! Prepares and lays out a JSON file of line items on a recording surface and
//! prints the draw operations.
//!
//! ## Usage
//! ```bash
//! # Lay out items starting at the default top (60mm)
//! cargo run -p folio-render --bin folio-rows -- --items ./items.json
//!
//! # Custom config and start position
//! cargo run -p folio-render --bin folio-rows -- --items ./items.json --config ./render.toml --top 80
//! ```
//!
//! ## Input
//! ```json
//! [
//!   { "name": "Consulting", "unit_price": "150.00", "quantity": "2",
//!     "paid_total": "297.00", "discount": { "percent": "10" },
//!     "tax": { "percent": "10" } }
//! ]
//! ```
//!
//! ## Output (stdout)
//! `{ "rows": [{ "totals": …, "extent": … }], "ops": [ … ] }`
//! Logs go to stderr; `RUST_LOG=folio=trace` for more detail.

use std::env;
use std::path::PathBuf;

use folio_core::{prepare_all, LineItem, LineTotals};
use folio_render::{DrawOp, DrawingSurface, RecordingSurface, RenderConfig, RowExtent, RowLayout};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_TOP_MM: f64 = 60.0;

#[derive(Serialize)]
struct RowReport {
    totals: LineTotals,
    extent: RowExtent,
}

#[derive(Serialize)]
struct Report {
    rows: Vec<RowReport>,
    ops: Vec<DrawOp>,
}

struct Args {
    items: PathBuf,
    config: Option<PathBuf>,
    top: f64,
}

fn print_usage() {
    eprintln!("Folio row layout runner");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    folio-rows --items <path> [--config <path>] [--top <mm>]");
}

fn parse_args() -> Result<Args, Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let mut items = None;
    let mut config = None;
    let mut top = DEFAULT_TOP_MM;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--items" | "-i" => {
                items = args.get(i + 1).map(PathBuf::from);
                i += 1;
            }
            "--config" | "-c" => {
                config = args.get(i + 1).map(PathBuf::from);
                i += 1;
            }
            "--top" => {
                let value = args.get(i + 1).ok_or("--top needs a value")?;
                top = parse_top(value)?;
                i += 1;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("Unknown argument: {}", other).into()),
        }
        i += 1;
    }

    let items = items.ok_or("--items <path> is required")?;
    Ok(Args { items, config, top })
}

/// Parses the start position in mm, rejecting `NaN` and infinities.
fn parse_top(value: &str) -> Result<f64, Box<dyn std::error::Error>> {
    let top: f64 = value.parse()?;
    if !top.is_finite() {
        return Err(format!("--top must be a finite number, got {}", value).into());
    }
    Ok(top)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - Default: INFO level, debug for folio crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,folio_core=debug,folio_render=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            print_usage();
            return Err(e);
        }
    };

    let config = RenderConfig::load(args.config)?;

    let contents = std::fs::read_to_string(&args.items)?;
    let items: Vec<LineItem> = serde_json::from_str(&contents)?;
    info!(count = items.len(), path = ?args.items, "Loaded line items");

    let lines = prepare_all(&items)?;

    let layout = RowLayout::new(&config.geometry, &config.money)?;
    let mut surface = RecordingSurface::new(config.charset, config.geometry.base_style());
    surface.set_y(args.top);
    let extents = layout.layout_all(&mut surface, &lines)?;

    info!(rows = extents.len(), bottom = surface.y(), "Laid out rows");

    let report = Report {
        rows: lines
            .iter()
            .zip(extents)
            .map(|(line, extent)| RowReport {
                totals: line.totals(),
                extent,
            })
            .collect(),
        ops: surface.into_ops(),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_top() {
        assert_eq!(parse_top("80").unwrap(), 80.0);
        assert_eq!(parse_top("12.5").unwrap(), 12.5);
        assert!(parse_top("abc").is_err());
    }

    #[test]
    fn test_parse_top_rejects_non_finite() {
        for value in ["NaN", "inf", "-inf", "infinity"] {
            let err = parse_top(value).unwrap_err();
            assert!(err.to_string().contains("finite"), "{value}: {err}");
        }
    }
}
