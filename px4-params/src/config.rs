//! Scraper configuration
//!
//! Defaults mirror the layout of a PX4-Autopilot checkout: injected parameters
//! live at a fixed path, parameters are defined in C/C++ sources, and build
//! output directories are never scanned.
//!
//! # Example
//! ```rust
//! use px4_params::ScraperConfig;
//!
//! let config = ScraperConfig::new("/work/PX4-Autopilot")
//!     .with_output_dir("/tmp/scraped")
//!     .with_excluded_segment("build");
//! assert_eq!(config.output_path().file_name().unwrap(), "px4_parameters.json");
//! ```

use std::path::{Path, PathBuf};

/// Injected parameters document, relative to the repository root
pub const INJECTED_XML_PATH: &str = "src/lib/parameters/parameters_injected.xml";

/// Source extensions scanned for parameter definitions, in processing order
pub const SOURCE_EXTENSIONS: [&str; 4] = ["c", "cpp", "h", "hpp"];

/// Path segment marking build output
pub const BUILD_DIR_SEGMENT: &str = "build";

/// File name of the exported document
pub const OUTPUT_FILE_NAME: &str = "px4_parameters.json";

/// Default output directory name, created next to the tool
pub const DEFAULT_OUTPUT_DIR_NAME: &str = "scraped_data";

/// Default repository directory name, a sibling of the tool
pub const DEFAULT_REPO_DIR_NAME: &str = "PX4-Autopilot";

/// Directory the tool lives in
pub fn tool_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Repository path used when none is given
pub fn default_repo_path() -> PathBuf {
    let tool_dir = tool_dir();
    tool_dir
        .parent()
        .unwrap_or(&tool_dir)
        .join(DEFAULT_REPO_DIR_NAME)
}

/// Output directory used when none is given
pub fn default_output_dir() -> PathBuf {
    tool_dir().join(DEFAULT_OUTPUT_DIR_NAME)
}

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Root of the firmware source tree
    pub repo_path: PathBuf,
    /// Directory receiving the exported document
    pub output_dir: PathBuf,
    /// Injected parameters document, relative to `repo_path`
    pub injected_xml: PathBuf,
    /// Extensions (without the dot) of scanned source files
    pub extensions: Vec<String>,
    /// Paths with a component equal to this are skipped
    pub excluded_segment: String,
    pub output_file_name: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self::new(default_repo_path())
    }
}

impl ScraperConfig {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
            output_dir: default_output_dir(),
            injected_xml: PathBuf::from(INJECTED_XML_PATH),
            extensions: SOURCE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            excluded_segment: BUILD_DIR_SEGMENT.to_string(),
            output_file_name: OUTPUT_FILE_NAME.to_string(),
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_injected_xml(mut self, injected_xml: impl Into<PathBuf>) -> Self {
        self.injected_xml = injected_xml.into();
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_excluded_segment(mut self, segment: impl Into<String>) -> Self {
        self.excluded_segment = segment.into();
        self
    }

    /// Absolute location of the injected parameters document
    pub fn injected_xml_path(&self) -> PathBuf {
        self.repo_path.join(&self.injected_xml)
    }

    /// Location of the exported JSON document
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file_name)
    }

    /// Processing rank of a file by extension, `None` if it is not scanned
    pub fn extension_rank(&self, path: &Path) -> Option<usize> {
        let ext = path.extension()?.to_str()?;
        self.extensions.iter().position(|e| e == ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = ScraperConfig::new("/px4");

        assert_eq!(
            config.injected_xml_path(),
            PathBuf::from("/px4/src/lib/parameters/parameters_injected.xml")
        );
        assert!(config.output_dir.ends_with("scraped_data"));
        assert!(config.output_path().ends_with("scraped_data/px4_parameters.json"));
    }

    #[test]
    fn test_default_repo_is_sibling_of_tool() {
        let repo = default_repo_path();
        assert_eq!(repo.file_name().unwrap(), "PX4-Autopilot");
        assert_eq!(repo.parent(), tool_dir().parent());
    }

    #[test]
    fn test_extension_rank_follows_order() {
        let config = ScraperConfig::new("/px4");

        assert_eq!(config.extension_rank(Path::new("a/b.c")), Some(0));
        assert_eq!(config.extension_rank(Path::new("a/b.cpp")), Some(1));
        assert_eq!(config.extension_rank(Path::new("a/b.h")), Some(2));
        assert_eq!(config.extension_rank(Path::new("a/b.hpp")), Some(3));
        assert_eq!(config.extension_rank(Path::new("a/b.py")), None);
        assert_eq!(config.extension_rank(Path::new("a/Makefile")), None);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ScraperConfig::new("/px4")
            .with_output_dir("/out")
            .with_injected_xml("params.xml")
            .with_extensions(["cc"])
            .with_excluded_segment("out");

        assert_eq!(config.output_path(), PathBuf::from("/out/px4_parameters.json"));
        assert_eq!(config.injected_xml_path(), PathBuf::from("/px4/params.xml"));
        assert_eq!(config.extension_rank(Path::new("x.cc")), Some(0));
        assert_eq!(config.extension_rank(Path::new("x.c")), None);
        assert_eq!(config.excluded_segment, "out");
    }
}
