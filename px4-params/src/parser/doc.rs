//! Interpretation of the documentation block preceding a parameter macro

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use strum::{AsRefStr, EnumString};

use super::{match_tag, strip_decoration};
use crate::error::{Result, parse_float, parse_int};
use crate::types::ParameterMetadata;

/// Tags that affect the generated metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum DocTag {
    Group,
    Min,
    Max,
    Unit,
    Decimal,
    Volatile,
    Category,
    Value,
}

/// Documentation gathered from one comment block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocComment {
    pub short_desc: String,
    pub long_desc: String,
    /// Last value of every tag, keyed by tag name
    pub tags: HashMap<String, String>,
    /// Every `@value <code> <description>` line, in order
    pub enum_values: Vec<(String, String)>,
}

impl DocComment {
    /// Interpret buffered comment lines
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut doc = DocComment::default();
        let mut long_desc = String::new();

        for line in lines {
            let line = strip_decoration(line.as_ref());

            if let Some((tag, value)) = match_tag(line) {
                if DocTag::from_str(tag) == Ok(DocTag::Value) {
                    if let Some(entry) = split_enum_value(value) {
                        doc.enum_values.push(entry);
                    }
                }
                doc.tags.insert(tag.to_string(), value.to_string());
            } else if doc.short_desc.is_empty() {
                doc.short_desc = line.to_string();
            } else {
                long_desc.push_str(line);
                long_desc.push(' ');
            }
        }

        doc.short_desc = doc.short_desc.trim().to_string();
        doc.long_desc = long_desc.trim().to_string();
        doc
    }

    pub fn tag(&self, tag: DocTag) -> Option<&str> {
        self.tags.get(tag.as_ref()).map(String::as_str)
    }

    pub fn has_tag(&self, tag: DocTag) -> bool {
        self.tags.contains_key(tag.as_ref())
    }

    /// Build the metadata of a `PARAM_DEFINE_*` invocation documented by this block
    pub fn into_metadata(
        self,
        name: &str,
        param_type: &str,
        default: &str,
    ) -> Result<ParameterMetadata> {
        let mut param = ParameterMetadata::new(name, param_type, default);

        if let Some(group) = self.tag(DocTag::Group) {
            param.group = group.to_string();
        }
        if let Some(min) = self.tag(DocTag::Min) {
            param.min_val = Some(parse_float("min", min)?);
        }
        if let Some(max) = self.tag(DocTag::Max) {
            param.max_val = Some(parse_float("max", max)?);
        }
        if let Some(unit) = self.tag(DocTag::Unit) {
            param.unit = Some(unit.to_string());
        }
        if let Some(decimal) = self.tag(DocTag::Decimal) {
            param.decimal = Some(parse_int("decimal", decimal)?);
        }
        param.volatile = self.has_tag(DocTag::Volatile);
        if let Some(category) = self.tag(DocTag::Category) {
            param.category = category.to_string();
        }

        param.values = self.enum_values.into_iter().collect::<BTreeMap<_, _>>();
        param.short_desc = self.short_desc;
        param.long_desc = self.long_desc;

        Ok(param)
    }
}

/// Split `<code> <description>`; a line without a code yields nothing
fn split_enum_value(value: &str) -> Option<(String, String)> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Some(match value.split_once(char::is_whitespace) {
        Some((code, description)) => (code.to_string(), description.trim().to_string()),
        None => (value.to_string(), String::new()),
    })
}
