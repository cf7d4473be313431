//! Builder for configuring archive extraction.

use std::path::Path;
use std::path::PathBuf;

use crate::ExtractOptions;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Result;

/// Builder for [`ExtractOptions`].
///
/// # Examples
///
/// ```no_run
/// use peel_core::Extractor;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = Extractor::new()
///     .archive("php-8.3.26.tar.gz")
///     .target_dir("/tmp/php-src")
///     .extract()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Extractor {
    archive_path: Option<PathBuf>,
    target_dir: Option<PathBuf>,
}

impl Extractor {
    /// Creates a new `Extractor`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the archive file path.
    #[must_use]
    pub fn archive<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.archive_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the target directory.
    #[must_use]
    pub fn target_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.target_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Finishes the builder.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::MissingOption` if the archive path or the
    /// target directory was not set.
    pub fn build(self) -> Result<ExtractOptions> {
        let source_archive = self.archive_path.ok_or(ExtractionError::MissingOption {
            option: "source_archive",
        })?;

        let target_directory = self.target_dir.ok_or(ExtractionError::MissingOption {
            option: "target_directory",
        })?;

        Ok(ExtractOptions {
            source_archive,
            target_directory,
        })
    }

    /// Builds the options and runs the extraction.
    ///
    /// # Errors
    ///
    /// Returns an error if an option is missing or extraction fails.
    pub fn extract(self) -> Result<ExtractionReport> {
        self.build()?.extract()
    }
}
