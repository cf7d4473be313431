//! Output formatter trait for CLI results.

use anyhow::Result;
use peel_core::ArchiveManifest;
use peel_core::ExtractionReport;
use peel_core::VerificationOutcome;
use serde::Serialize;
use std::path::Path;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Announce an extraction before any entry is written
    fn format_extraction_start(&self, archive: &Path, target: &Path);

    /// Format extraction result and the post-extraction checks
    fn format_extraction_result(
        &self,
        report: &ExtractionReport,
        checks: &[VerificationOutcome],
    ) -> Result<()>;

    /// Format archive listing
    fn format_manifest(&self, manifest: &ArchiveManifest, long: bool) -> Result<()>;

    /// Format standalone verification results
    fn format_verification(&self, target: &Path, outcomes: &[VerificationOutcome])
    -> Result<()>;

    /// Format warning message
    fn format_warning(&self, message: &str);

    /// Whether per-entry progress may be written to stdout
    fn shows_progress(&self) -> bool;
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    pub data: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub path: String,
    pub exists: bool,
}

impl From<&VerificationOutcome> for CheckOutput {
    fn from(outcome: &VerificationOutcome) -> Self {
        Self {
            path: outcome.path.display().to_string(),
            exists: outcome.exists,
        }
    }
}
