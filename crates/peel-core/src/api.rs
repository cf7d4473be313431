//! High-level public API for archive extraction.

use std::path::Path;

use tracing::info;

use crate::ExtractionReport;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::formats::ArchiveFormat;
use crate::formats::TarArchive;
use crate::types::TargetDir;

/// Extracts an archive into `target_dir`, dropping the first path component
/// of every entry.
///
/// The target directory is created (with parents) before the archive is
/// opened. Entries are written in archive order; the first failure aborts
/// the run and leaves earlier entries on disk.
///
/// # Errors
///
/// Returns an error if:
/// - The target directory cannot be created
/// - The archive cannot be opened or its format is unsupported
/// - An entry cannot be read or written
/// - A stripped entry name escapes the target directory
///
/// # Examples
///
/// ```no_run
/// use peel_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = extract_archive("php-8.3.26.tar", "/tmp/php-src")?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    target_dir: Q,
) -> Result<ExtractionReport> {
    extract_archive_with_progress(archive_path, target_dir, &mut NoopProgress)
}

/// Same as [`extract_archive`], reporting each entry to `progress`.
///
/// # Errors
///
/// See [`extract_archive`].
pub fn extract_archive_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    target_dir: Q,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    let archive_path = archive_path.as_ref();
    let target_dir = target_dir.as_ref();

    info!(
        archive = %archive_path.display(),
        target = %target_dir.display(),
        "extracting"
    );

    let target = TargetDir::ensure(target_dir)?;
    let mut archive = TarArchive::open(archive_path)?;
    let report = archive.extract(&target, progress)?;

    info!(
        files = report.files_extracted,
        directories = report.directories_created,
        skipped = report.entries_skipped,
        bytes = report.bytes_written,
        "extraction complete"
    );

    Ok(report)
}
