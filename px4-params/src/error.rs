//! Error types for parameter scraping

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed XML attribute: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("malformed XML: {0}")]
    XmlStructure(String),

    #[error("invalid {tag} value: {value:?}")]
    InvalidNumber { tag: &'static str, value: String },

    #[error("enum value without a code attribute")]
    MissingValueCode,

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Parse a floating-point bound (`@min`, `<max>`, ...)
///
/// Only finite values are accepted; JSON has no representation for
/// `inf` or `nan`.
pub(crate) fn parse_float(tag: &'static str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::InvalidNumber {
            tag,
            value: value.to_string(),
        })
}

/// Parse an integer hint such as `@decimal`
pub(crate) fn parse_int(tag: &'static str, value: &str) -> Result<i64> {
    value.trim().parse().map_err(|_| Error::InvalidNumber {
        tag,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float_trims_whitespace() {
        assert_eq!(parse_float("min", " -0.5 ").unwrap(), -0.5);
        assert_eq!(parse_float("max", "1e3").unwrap(), 1000.0);
    }

    #[test]
    fn test_parse_float_rejects_suffix() {
        let err = parse_float("min", "0.5f").unwrap_err();
        assert_eq!(err.to_string(), "invalid min value: \"0.5f\"");
    }

    #[test]
    fn test_parse_float_rejects_non_finite() {
        for value in ["inf", "-inf", "infinity", "NaN"] {
            assert!(
                matches!(parse_float("max", value), Err(Error::InvalidNumber { tag: "max", .. })),
                "{value} accepted"
            );
        }
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("decimal", "3").unwrap(), 3);
        assert!(parse_int("decimal", "2.5").is_err());
    }
}
