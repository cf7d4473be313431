//! Extraction options.

use std::path::Path;
use std::path::PathBuf;

use crate::ExtractionReport;
use crate::ProgressCallback;
use crate::Result;

/// What to extract and where.
///
/// # Examples
///
/// ```no_run
/// use peel_core::ExtractOptions;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let options = ExtractOptions::new("downloads/php-8.3.26.tar", "source/php-src");
/// let report = options.extract()?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Tar archive to read.
    pub source_archive: PathBuf,

    /// Directory the stripped entries are written into. Created if missing.
    pub target_directory: PathBuf,
}

impl ExtractOptions {
    /// Creates options for extracting `source_archive` into
    /// `target_directory`.
    #[must_use]
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(source_archive: P, target_directory: Q) -> Self {
        Self {
            source_archive: source_archive.as_ref().to_path_buf(),
            target_directory: target_directory.as_ref().to_path_buf(),
        }
    }

    /// Runs the extraction without progress reporting.
    pub fn extract(&self) -> Result<ExtractionReport> {
        crate::api::extract_archive(&self.source_archive, &self.target_directory)
    }

    /// Runs the extraction, reporting progress to `progress`.
    pub fn extract_with_progress(
        &self,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ExtractionReport> {
        crate::api::extract_archive_with_progress(
            &self.source_archive,
            &self.target_directory,
            progress,
        )
    }
}
