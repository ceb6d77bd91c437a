//! JSON export of the consolidated parameter map

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::ParameterMap;

/// Render the parameter map as pretty-printed JSON (2-space indent, UTF-8 kept verbatim)
pub fn to_json_string(params: &ParameterMap) -> Result<String> {
    Ok(serde_json::to_string_pretty(params)?)
}

/// Write the parameter map to `output_path`, creating its directory if needed
pub fn export_json(params: &ParameterMap, output_path: &Path) -> Result<()> {
    let json = to_json_string(params)?;

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(output_path, json).map_err(|e| Error::io(output_path, e))?;

    Ok(())
}

/// Read a previously exported document
pub fn load_json(path: &Path) -> Result<ParameterMap> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}
