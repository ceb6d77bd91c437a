//! Line-based extraction of documented `PARAM_DEFINE_*` macros

use std::path::Path;

use tracing::{debug, error, trace};

use super::doc::DocComment;
use super::{MacroDefinition, closes_comment, match_macro, opens_comment};
use crate::error::{Error, Result};
use crate::types::ParameterMetadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    OutsideComment,
    InsideComment,
}

/// Parameters extracted from one source file
#[derive(Debug, Clone, Default)]
pub struct ParsedSource {
    /// Definitions in file order
    pub parameters: Vec<ParameterMetadata>,
    /// Names of definitions dropped because their documentation was malformed
    pub dropped: Vec<String>,
}

/// Parse a source file from a path
///
/// `source_file` is the path recorded in each entry, relative to the repository root.
pub fn parse_source_file(path: &Path, source_file: &str) -> Result<ParsedSource> {
    let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(parse_source_string(&source, source_file))
}

/// Parse source text
pub fn parse_source_string(source: &str, source_file: &str) -> ParsedSource {
    let mut parsed = ParsedSource::default();
    let mut state = ScanState::OutsideComment;
    let mut comment: Vec<&str> = Vec::new();

    for (index, line) in source.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim();

        if opens_comment(line) {
            state = ScanState::InsideComment;
            comment.clear();
            continue;
        }

        match state {
            ScanState::InsideComment => {
                comment.push(line);
                if closes_comment(line) {
                    state = ScanState::OutsideComment;
                }
            }
            ScanState::OutsideComment => match match_macro(line) {
                Some(MacroDefinition::Define {
                    param_type,
                    name,
                    default,
                }) => {
                    let doc = DocComment::parse(&comment);
                    comment.clear();

                    match doc.into_metadata(name, param_type, default) {
                        Ok(mut param) => {
                            param.source_file = Some(source_file.to_string());
                            param.line_number = Some(line_number);
                            debug!(
                                name,
                                file = source_file,
                                line = line_number,
                                "Parsed parameter from source"
                            );
                            parsed.parameters.push(param);
                        }
                        Err(e) => {
                            error!(
                                name,
                                file = source_file,
                                line = line_number,
                                error = %e,
                                "Error processing parameter"
                            );
                            parsed.dropped.push(name.to_string());
                        }
                    }
                }
                Some(MacroDefinition::Px4Define { param_type, name }) => {
                    trace!(
                        name,
                        param_type,
                        file = source_file,
                        line = line_number,
                        "Ignoring implied-default parameter reference"
                    );
                }
                None => {}
            },
        }
    }

    parsed
}
