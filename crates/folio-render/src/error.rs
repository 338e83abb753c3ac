//! # Render Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  EncodeError (charset) ──┐                                             │
//! │                          ▼                                              │
//! │  GeometryError ────► RenderError ← Adds line name and field            │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  toml / io ────────► ConfigError                                        │
//! │                                                                         │
//! │  Both abort the current row/document; nothing is substituted           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use folio_core::LineField;
use thiserror::Error;

use crate::encoding::EncodeError;

/// Column geometry that cannot produce a sensible row.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid geometry: {0}")]
pub struct GeometryError(pub String);

/// Row layout failures.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A field's text cannot be written in the output charset.
    ///
    /// ## When This Occurs
    /// - Name contains CJK text while the page uses a WinAnsi core font
    /// - Currency symbol outside the charset (e.g. `₹` with WinAnsi)
    #[error("line '{line}': {field} cannot be encoded: {source}")]
    Encoding {
        line: String,
        field: LineField,
        #[source]
        source: EncodeError,
    },

    /// Layout was constructed with unusable geometry.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Render configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `RenderConfig`.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config parsed but describes an unusable layout.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

pub type RenderResult<T> = Result<T, RenderError>;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Charset;

    #[test]
    fn test_encoding_error_names_line_and_field() {
        let err = RenderError::Encoding {
            line: "Sushi".to_string(),
            field: LineField::Description,
            source: EncodeError {
                ch: '寿',
                charset: Charset::WinAnsi,
            },
        };
        assert!(err
            .to_string()
            .starts_with("line 'Sushi': description cannot be encoded"));
    }

    #[test]
    fn test_geometry_error_converts() {
        let err: ConfigError = GeometryError("offsets must increase".to_string()).into();
        assert_eq!(err.to_string(), "invalid geometry: offsets must increase");
    }
}
