//! Scan-and-merge pipeline
//!
//! Stages run in a fixed order so that source definitions override injected
//! ones with the same name:
//! 1. injected XML document
//! 2. source tree
//! 3. JSON export

use std::path::PathBuf;

use tracing::{debug, error, info, info_span};

use crate::config::ScraperConfig;
use crate::discovery::{discover_sources, relative_source_path};
use crate::export::export_json;
use crate::parser::source::parse_source_file;
use crate::types::ParameterMap;
use crate::xml::parse_injected_file;

/// Counters collected over one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeReport {
    pub xml_parameters: usize,
    pub files_scanned: usize,
    pub files_failed: usize,
    pub source_parameters: usize,
    pub parameters_dropped: usize,
    /// Source definitions that replaced an existing entry
    pub overrides: usize,
    pub total_parameters: usize,
    /// Set once the document was written
    pub output_path: Option<PathBuf>,
}

pub struct ParameterScraper {
    config: ScraperConfig,
    parameters: ParameterMap,
    report: ScrapeReport,
}

impl ParameterScraper {
    pub fn new(config: ScraperConfig) -> Self {
        Self {
            config,
            parameters: ParameterMap::new(),
            report: ScrapeReport::default(),
        }
    }

    pub fn parameters(&self) -> &ParameterMap {
        &self.parameters
    }

    pub fn report(&self) -> &ScrapeReport {
        &self.report
    }

    /// Consume the scraper, releasing the collected map
    pub fn into_parameters(self) -> ParameterMap {
        self.parameters
    }

    /// Run every stage and write the document
    pub fn parse_all(&mut self) -> ScrapeReport {
        info!(repo = %self.config.repo_path.display(), "Starting parameter parsing");

        self.ingest_injected_xml();
        self.scan_sources();
        self.save();

        self.report.total_parameters = self.parameters.len();
        info!(
            total = self.report.total_parameters,
            from_xml = self.report.xml_parameters,
            from_source = self.report.source_parameters,
            overrides = self.report.overrides,
            dropped = self.report.parameters_dropped,
            files_scanned = self.report.files_scanned,
            files_failed = self.report.files_failed,
            "Parameter parsing finished"
        );
        self.report.clone()
    }

    /// Load the injected parameters document, if present
    ///
    /// A malformed document contributes nothing.
    pub fn ingest_injected_xml(&mut self) {
        let path = self.config.injected_xml_path();
        let _span = info_span!("xml", path = %path.display()).entered();

        match parse_injected_file(&path) {
            Ok(Some(params)) => {
                info!(count = params.len(), "Parsed injected parameters");
                self.report.xml_parameters += params.len();
                self.parameters.extend(params);
            }
            Ok(None) => debug!("No injected parameters document"),
            Err(e) => error!(error = %e, "Error parsing injected parameters"),
        }
    }

    /// Extract parameters from every source file under the repository
    pub fn scan_sources(&mut self) {
        let _span = info_span!("sources").entered();
        info!("Scanning source files for parameters");

        for path in discover_sources(&self.config) {
            let source_file = relative_source_path(&self.config.repo_path, &path);

            let parsed = match parse_source_file(&path, &source_file) {
                Ok(parsed) => parsed,
                Err(e) => {
                    error!(file = %source_file, error = %e, "Error parsing source file");
                    self.report.files_failed += 1;
                    continue;
                }
            };

            self.report.files_scanned += 1;
            self.report.parameters_dropped += parsed.dropped.len();

            for param in parsed.parameters {
                self.report.source_parameters += 1;
                if let Some(previous) = self.parameters.insert(param.name.clone(), param) {
                    debug!(
                        name = %previous.name,
                        previous = previous.source_file.as_deref().unwrap_or("injected XML"),
                        "Overriding earlier definition"
                    );
                    self.report.overrides += 1;
                }
            }
        }
    }

    /// Write the collected parameters
    ///
    /// Failures are logged only.
    pub fn save(&mut self) {
        let output_path = self.config.output_path();
        let _span = info_span!("export", path = %output_path.display()).entered();

        match export_json(&self.parameters, &output_path) {
            Ok(()) => {
                info!(count = self.parameters.len(), "Successfully saved parameters");
                self.report.output_path = Some(output_path);
            }
            Err(e) => error!(error = %e, "Error saving parameters"),
        }
    }
}
