pub mod doc;
pub mod source;

use regex::Regex;
use std::sync::LazyLock;

static COMMENT_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/\*\*").unwrap());

static COMMENT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([a-zA-Z][a-zA-Z0-9_]*)\s*(.*)").unwrap());

static PARAM_DEFINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"PARAM_DEFINE_([A-Z_][A-Z0-9_]*)\s*\(([A-Z_][A-Z0-9_]*)\s*,\s*([^ ,\)]+)\s*\)\s*;",
    )
    .unwrap()
});

static PX4_PARAM_DEFINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"PX4_PARAM_DEFINE_([A-Z_][A-Z0-9_]*)\s*\(([A-Z_][A-Z0-9_]*)\s*\)\s*;").unwrap()
});

const COMMENT_END: &str = "*/";

/// Characters removed from both ends of a documentation line
const DECORATION: &[char] = &['/', '*', ' '];

/// A parameter-defining macro found on a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacroDefinition<'a> {
    /// `PARAM_DEFINE_FLOAT(NAME, 1.5);`
    Define {
        param_type: &'a str,
        name: &'a str,
        default: &'a str,
    },
    /// `PX4_PARAM_DEFINE_FLOAT(NAME);`, default implied by the type
    Px4Define { param_type: &'a str, name: &'a str },
}

impl<'a> MacroDefinition<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Self::Define { name, .. } | Self::Px4Define { name, .. } => name,
        }
    }
}

/// Whether the line opens a documentation block (`/**`)
pub fn opens_comment(line: &str) -> bool {
    COMMENT_START.is_match(line)
}

/// Whether the line closes a block comment
pub fn closes_comment(line: &str) -> bool {
    line.contains(COMMENT_END)
}

/// Find a parameter macro invocation anywhere in the line
pub fn match_macro(line: &str) -> Option<MacroDefinition<'_>> {
    if let Some(caps) = PARAM_DEFINE.captures(line) {
        let (_, [param_type, name, default]) = caps.extract();
        return Some(MacroDefinition::Define {
            param_type,
            name,
            default,
        });
    }

    PX4_PARAM_DEFINE.captures(line).map(|caps| {
        let (_, [param_type, name]) = caps.extract();
        MacroDefinition::Px4Define { param_type, name }
    })
}

/// Find an `@tag value` pair anywhere in the line
pub fn match_tag(line: &str) -> Option<(&str, &str)> {
    COMMENT_TAG.captures(line).map(|caps| {
        let (_, [tag, value]) = caps.extract();
        (tag, value)
    })
}

/// Remove comment decoration (`/`, `*`, spaces) from both ends of a line
pub fn strip_decoration(line: &str) -> &str {
    line.trim_matches(DECORATION)
}
