//! PX4 parameter metadata extraction
//!
//! Parameters are collected from two places in a PX4-Autopilot checkout:
//! - the injected parameters XML document
//! - documentation comments preceding `PARAM_DEFINE_*` macros in C/C++ sources
//!
//! Both are merged into one map keyed by parameter name (sources override
//! injected entries) and exported as a single JSON document.
//!
//! # Example
//! ```no_run
//! use px4_params::{ParameterScraper, ScraperConfig};
//!
//! let config = ScraperConfig::new("../PX4-Autopilot").with_output_dir("scraped_data");
//! let mut scraper = ParameterScraper::new(config);
//! let report = scraper.parse_all();
//! println!("{} parameters", report.total_parameters);
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod export;
pub mod parser;
pub mod scraper;
pub mod types;
pub mod xml;

pub use config::ScraperConfig;
pub use error::{Error, Result};
pub use export::{export_json, load_json};
pub use scraper::{ParameterScraper, ScrapeReport};
pub use types::{DEFAULT_CATEGORY, DEFAULT_GROUP, ParameterMap, ParameterMetadata};
