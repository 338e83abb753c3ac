//! # Render Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     FOLIO_FONT=Courier                                                 │
//! │     FOLIO_CURRENCY_SYMBOL=$                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/folio/render.toml (Linux)                                │
//! │     ~/Library/Application Support/com.folio.folio/render.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! charset = "win_ansi"   # win_ansi | unicode
//!
//! [geometry]
//! name_offset = 10.0
//! total_offset = 163.0
//! font_family = "Helvetica"
//! base_text_color = [35, 35, 35]
//!
//! [money]
//! symbol = "€"
//! precision = 2
//! thousand = "."
//! decimal = ","
//! format = "%s%v"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::encoding::Charset;
use crate::error::{ConfigError, ConfigResult};
use crate::geometry::RenderGeometry;
use crate::money_format::AccountingFormat;

/// Everything row layout needs besides the line itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub charset: Charset,
    pub geometry: RenderGeometry,
    pub money: AccountingFormat,
}

impl RenderConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (render.toml)
    /// 3. Environment variables
    ///
    /// An explicitly given path must exist; the default path is optional.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading render config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.geometry.validate()?;
        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(font) = std::env::var("FOLIO_FONT") {
            debug!(font = %font, "Overriding font family from environment");
            self.geometry.font_family = font;
        }

        if let Ok(symbol) = std::env::var("FOLIO_CURRENCY_SYMBOL") {
            debug!(symbol = %symbol, "Overriding currency symbol from environment");
            self.money.symbol = symbol;
        }

        if let Ok(precision) = std::env::var("FOLIO_MONEY_PRECISION") {
            match precision.parse::<u32>() {
                Ok(p) => self.money.precision = p,
                Err(_) => warn!(precision = %precision, "Ignoring invalid money precision"),
            }
        }

        if let Ok(charset) = std::env::var("FOLIO_CHARSET") {
            match charset.parse() {
                Ok(parsed) => self.charset = parsed,
                Err(e) => warn!(error = %e, "Ignoring charset from environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "folio", "folio")
            .map(|dirs| dirs.config_dir().join("render.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Rgb;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RenderConfig::from_toml(
            r#"
            charset = "unicode"

            [geometry]
            font_family = "DejaVu Sans"
            muted_text_color = [120, 120, 120]

            [money]
            symbol = "$"
            "#,
        )
        .unwrap();

        assert_eq!(config.charset, Charset::Unicode);
        assert_eq!(config.geometry.font_family, "DejaVu Sans");
        assert_eq!(config.geometry.muted_text_color, Rgb(120, 120, 120));
        assert_eq!(config.geometry.total_offset, 163.0);
        assert_eq!(config.money.symbol, "$");
        assert_eq!(config.money.precision, 2);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = RenderConfig::from_toml("charset = 5").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validate_rejects_bad_geometry() {
        let config = RenderConfig::from_toml("[geometry]\nright_edge = 5.0").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Geometry(_))));
    }

    #[test]
    fn test_missing_explicit_file_is_io_error() {
        let err = RenderConfig::load(Some(PathBuf::from("/nonexistent/folio/render.toml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = RenderConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(RenderConfig::from_toml(&text).unwrap(), config);
    }
}
