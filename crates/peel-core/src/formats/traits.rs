//! Common traits for archive format handlers.

use crate::ExtractionReport;
use crate::ProgressCallback;
use crate::Result;
use crate::types::TargetDir;

/// Trait for archive format handlers.
pub trait ArchiveFormat {
    /// Extracts the archive into `target` with the leading path component
    /// of every entry removed.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry cannot be read or written. Entries
    /// written before the failure stay on disk.
    fn extract(
        &mut self,
        target: &TargetDir,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ExtractionReport>;

    /// Returns the archive format name.
    fn format_name(&self) -> &str;
}
