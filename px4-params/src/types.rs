use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Group assigned to parameters that never declare one
pub const DEFAULT_GROUP: &str = "Uncategorized";

/// Category assigned to parameters without an explicit `@category`
pub const DEFAULT_CATEGORY: &str = "Standard";

/// All known parameters, keyed by parameter name
pub type ParameterMap = BTreeMap<String, ParameterMetadata>;

/// Metadata for one firmware parameter
///
/// Field names match the keys of the exported JSON document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ParameterMetadata {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
    /// Default literal exactly as written (`1.5`, `0.2f`, ...)
    pub default: String,
    pub short_desc: String,
    pub long_desc: String,
    pub min_val: Option<f64>,
    pub max_val: Option<f64>,
    pub unit: Option<String>,
    pub decimal: Option<i64>,
    pub group: String,
    /// Enum code to description
    pub values: BTreeMap<String, String>,
    pub volatile: bool,
    pub category: String,
    /// Path relative to the repository root, `None` for injected parameters
    pub source_file: Option<String>,
    /// 1-based line of the defining macro
    pub line_number: Option<usize>,
}

impl ParameterMetadata {
    /// Create an entry with every optional field unset
    pub fn new(
        name: impl Into<String>,
        param_type: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            default: default.into(),
            short_desc: String::new(),
            long_desc: String::new(),
            min_val: None,
            max_val: None,
            unit: None,
            decimal: None,
            group: DEFAULT_GROUP.to_string(),
            values: BTreeMap::new(),
            volatile: false,
            category: DEFAULT_CATEGORY.to_string(),
            source_file: None,
            line_number: None,
        }
    }

    /// Whether the entry came from a source file rather than the injected XML
    pub fn is_from_source(&self) -> bool {
        self.source_file.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let param = ParameterMetadata::new("MC_ROLL_P", "FLOAT", "6.5");

        assert_eq!(param.name, "MC_ROLL_P");
        assert_eq!(param.param_type, "FLOAT");
        assert_eq!(param.default, "6.5");
        assert_eq!(param.group, "Uncategorized");
        assert_eq!(param.category, "Standard");
        assert!(param.values.is_empty());
        assert!(!param.volatile);
        assert!(!param.is_from_source());
    }

    #[test]
    fn test_serializes_type_key_and_nulls() {
        let param = ParameterMetadata::new("SYS_AUTOSTART", "INT32", "0");
        let value = serde_json::to_value(&param).unwrap();

        assert_eq!(value["type"], "INT32");
        assert!(value.get("param_type").is_none());
        assert!(value["min_val"].is_null());
        assert!(value["unit"].is_null());
        assert!(value["line_number"].is_null());
        assert_eq!(value["values"], serde_json::json!({}));
    }
}
