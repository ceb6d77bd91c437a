//! Injected parameters document
//!
//! The document is a shallow tree:
//!
//! ```xml
//! <parameters>
//!   <group name="Battery">
//!     <parameter name="BAT_N_CELLS" type="INT32" default="0" volatile="true">
//!       <short_desc>Number of cells</short_desc>
//!       <min>0</min>
//!       <values><value code="2">2S</value></values>
//!     </parameter>
//!   </group>
//! </parameters>
//! ```
//!
//! It is read into a small element tree first so that a syntax error anywhere
//! discards the whole document.

use std::collections::BTreeMap;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, error};

use crate::error::{Error, Result, parse_float, parse_int};
use crate::types::{DEFAULT_GROUP, ParameterMap, ParameterMetadata};

/// Element of a parsed XML document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    /// Concatenated text content, trimmed
    pub text: String,
}

impl XmlElement {
    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| Error::XmlStructure(e.to_string()))?
            .to_string();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| Error::XmlStructure(e.to_string()))?
                .to_string();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            ..Default::default()
        })
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First child with the given tag name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.as_str())
    }
}

/// Parse an XML string into its root element
pub fn parse_xml_tree(source: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(XmlElement::from_start(&start)?),
            Event::Empty(start) => {
                let element = XmlElement::from_start(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::XmlStructure("unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::XmlStructure(format!("unclosed element <{}>", open.name)));
    }

    root.ok_or_else(|| Error::XmlStructure("document has no root element".to_string()))
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    mut element: XmlElement,
) -> Result<()> {
    element.text = element.text.trim().to_string();
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(Error::XmlStructure(format!(
                "second root element <{}>",
                element.name
            )));
        }
    }
    Ok(())
}

/// Convert one `<parameter>` element
///
/// Returns `Ok(None)` for elements without a name.
pub fn parse_parameter_element(
    element: &XmlElement,
    group: &str,
) -> Result<Option<ParameterMetadata>> {
    let Some(name) = element.attr("name").filter(|n| !n.is_empty()) else {
        return Ok(None);
    };

    let mut param = ParameterMetadata::new(
        name,
        element.attr("type").unwrap_or_default(),
        element.attr("default").unwrap_or_default(),
    );
    param.short_desc = element.child_text("short_desc").unwrap_or_default().to_string();
    param.long_desc = element.child_text("long_desc").unwrap_or_default().to_string();
    param.group = group.to_string();
    param.volatile = element.attr("volatile") == Some("true");

    if let Some(min) = element.child_text("min") {
        param.min_val = Some(parse_float("min", min)?);
    }
    if let Some(max) = element.child_text("max") {
        param.max_val = Some(parse_float("max", max)?);
    }
    if let Some(unit) = element.child_text("unit") {
        param.unit = Some(unit.to_string());
    }
    if let Some(decimal) = element.child_text("decimal") {
        param.decimal = Some(parse_int("decimal", decimal)?);
    }

    if let Some(values) = element.child("values") {
        param.values = parse_enum_values(values)?;
    }

    Ok(Some(param))
}

fn parse_enum_values(values: &XmlElement) -> Result<BTreeMap<String, String>> {
    values
        .children_named("value")
        .map(|value| -> Result<(String, String)> {
            let code = value.attr("code").ok_or(Error::MissingValueCode)?;
            Ok((code.to_string(), value.text.clone()))
        })
        .collect()
}

/// Parse every parameter of an injected document
///
/// A malformed parameter is logged and skipped; a malformed document fails
/// as a whole.
pub fn parse_injected_string(source: &str) -> Result<ParameterMap> {
    let root = parse_xml_tree(source)?;
    let mut params = ParameterMap::new();

    for group in root.children_named("group") {
        let group_name = group.attr("name").unwrap_or(DEFAULT_GROUP);

        for element in group.children_named("parameter") {
            match parse_parameter_element(element, group_name) {
                Ok(Some(param)) => {
                    debug!(name = %param.name, "Parsed parameter from XML");
                    params.insert(param.name.clone(), param);
                }
                Ok(None) => debug!(group = group_name, "Skipping unnamed XML parameter"),
                Err(e) => error!(
                    name = element.attr("name").unwrap_or("unknown"),
                    error = %e,
                    "Error parsing parameter"
                ),
            }
        }
    }

    Ok(params)
}

/// Read and parse an injected parameters document
///
/// A missing file yields `Ok(None)`.
pub fn parse_injected_file(path: &Path) -> Result<Option<ParameterMap>> {
    if !path.exists() {
        return Ok(None);
    }
    let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_injected_string(&source).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<parameters>
  <version>3</version>
  <group name="Battery Calibration">
    <parameter default="0" name="BAT1_N_CELLS" type="INT32" volatile="true">
      <short_desc>Number of cells for battery 1</short_desc>
      <long_desc>Defines the number of cells &amp; their wiring.</long_desc>
      <min>0</min>
      <max>16</max>
      <unit>S</unit>
      <decimal>0</decimal>
      <values>
        <value code="0">Unknown</value>
        <value code="2">2S Battery</value>
      </values>
    </parameter>
    <parameter default="4.05" name="BAT1_V_CHARGED" type="FLOAT" volatile="false">
      <short_desc>Full cell voltage</short_desc>
    </parameter>
    <parameter default="1" type="INT32">
      <short_desc>No name</short_desc>
    </parameter>
  </group>
  <group>
    <parameter name="NO_GROUP" type="INT32" default="1"/>
  </group>
</parameters>
"#;

    #[test]
    fn test_parse_full_parameter() {
        let params = parse_injected_string(SAMPLE).unwrap();
        let p = &params["BAT1_N_CELLS"];

        assert_eq!(p.param_type, "INT32");
        assert_eq!(p.default, "0");
        assert_eq!(p.short_desc, "Number of cells for battery 1");
        assert_eq!(p.long_desc, "Defines the number of cells & their wiring.");
        assert_eq!(p.min_val, Some(0.0));
        assert_eq!(p.max_val, Some(16.0));
        assert_eq!(p.unit.as_deref(), Some("S"));
        assert_eq!(p.decimal, Some(0));
        assert_eq!(p.group, "Battery Calibration");
        assert!(p.volatile);
        assert_eq!(p.values.len(), 2);
        assert_eq!(p.values["2"], "2S Battery");
        assert_eq!(p.category, "Standard");
        assert_eq!(p.source_file, None);
        assert_eq!(p.line_number, None);
    }

    #[test]
    fn test_absent_optional_fields_are_none() {
        let params = parse_injected_string(SAMPLE).unwrap();
        let p = &params["BAT1_V_CHARGED"];

        assert_eq!(p.long_desc, "");
        assert_eq!(p.min_val, None);
        assert_eq!(p.max_val, None);
        assert_eq!(p.unit, None);
        assert_eq!(p.decimal, None);
        assert!(p.values.is_empty());
        assert!(!p.volatile);
    }

    #[test]
    fn test_unnamed_parameter_is_skipped() {
        let params = parse_injected_string(SAMPLE).unwrap();
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_group_without_name_is_uncategorized() {
        let params = parse_injected_string(SAMPLE).unwrap();
        let p = &params["NO_GROUP"];

        assert_eq!(p.group, "Uncategorized");
        assert_eq!(p.short_desc, "");
    }

    #[test]
    fn test_bad_number_drops_only_that_parameter() {
        let xml = r#"<parameters><group name="G">
            <parameter name="BAD" type="FLOAT" default="0"><min>low</min></parameter>
            <parameter name="GOOD" type="FLOAT" default="0"><min>1</min></parameter>
        </group></parameters>"#;

        let params = parse_injected_string(xml).unwrap();
        assert!(!params.contains_key("BAD"));
        assert_eq!(params["GOOD"].min_val, Some(1.0));
    }

    #[test]
    fn test_non_finite_bound_drops_parameter() {
        let xml = r#"<parameters><group name="G">
            <parameter name="UNBOUNDED" type="FLOAT" default="0"><max>inf</max></parameter>
            <parameter name="NOT_A_NUMBER" type="FLOAT" default="0"><min>nan</min></parameter>
            <parameter name="BOUNDED" type="FLOAT" default="0"><max>1e6</max></parameter>
        </group></parameters>"#;

        let params = parse_injected_string(xml).unwrap();
        assert!(!params.contains_key("UNBOUNDED"));
        assert!(!params.contains_key("NOT_A_NUMBER"));
        assert_eq!(params["BOUNDED"].max_val, Some(1e6));
    }

    #[test]
    fn test_malformed_document_fails() {
        let xml = r#"<parameters><group name="G">
            <parameter name="A" type="FLOAT" default="0"></parameter>
        </parameters>"#;

        assert!(parse_injected_string(xml).is_err());
    }

    #[test]
    fn test_unclosed_document_fails() {
        let xml = r#"<parameters><group name="G">"#;
        assert!(parse_injected_string(xml).is_err());
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = parse_injected_file(&temp_dir.path().join("absent.xml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_parse_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("parameters_injected.xml");
        fs::write(&path, SAMPLE).unwrap();

        let params = parse_injected_file(&path).unwrap().unwrap();
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_tree_keeps_nesting() {
        let root = parse_xml_tree("<a x=\"1\"><b>text</b><b/><c><![CDATA[raw <data>]]></c></a>").unwrap();

        assert_eq!(root.name, "a");
        assert_eq!(root.attr("x"), Some("1"));
        assert_eq!(root.children_named("b").count(), 2);
        assert_eq!(root.child_text("b"), Some("text"));
        assert_eq!(root.child_text("c"), Some("raw <data>"));
    }
}
