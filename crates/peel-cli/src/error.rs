//! Error conversion utilities for CLI.
//!
//! Converts peel-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use peel_core::ExtractionError;
use std::path::Path;

/// Converts `ExtractionError` to user-friendly anyhow error with context
pub fn convert_extraction_error(err: ExtractionError, archive: &Path) -> anyhow::Error {
    match err {
        ExtractionError::PathTraversal { path } => {
            anyhow!(
                "Archive '{}' contains an entry outside the target directory: '{}'\n\
                 HINT: Entry names must stay relative after the top-level directory is removed.",
                archive.display(),
                path.display()
            )
        }
        ExtractionError::UnsupportedFormat { path } => {
            anyhow!(
                "Archive format not supported: {}\n\
                 HINT: The file content is not a tar archive, nor tar compressed with gzip, bzip2, xz or zstd",
                path.display()
            )
        }
        ExtractionError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{}': {}\n\
                 HINT: The archive may be corrupted, truncated or compressed with a different codec.",
                archive.display(),
                reason
            )
        }
        ExtractionError::Io(io_err) => {
            let hint = match io_err.kind() {
                std::io::ErrorKind::NotFound => "\nHINT: Check that the archive path exists.",
                std::io::ErrorKind::PermissionDenied => {
                    "\nHINT: Check write permissions on the target directory."
                }
                _ => "",
            };
            anyhow!(
                "I/O error while processing '{}': {}{}",
                archive.display(),
                io_err,
                hint
            )
        }
        ExtractionError::MissingOption { .. } => anyhow::Error::from(err)
            .context(format!("Error processing archive '{}'", archive.display())),
    }
}

/// Adds context to a generic error about archive operations
pub fn add_archive_context<T>(
    result: Result<T, ExtractionError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_extraction_error(e, archive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_path_traversal_error() {
        let err = ExtractionError::PathTraversal {
            path: PathBuf::from("../etc/passwd"),
        };
        let converted = convert_extraction_error(err, Path::new("evil.tar"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("outside the target directory"));
        assert!(msg.contains("evil.tar"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_unsupported_format_error() {
        let err = ExtractionError::UnsupportedFormat {
            path: PathBuf::from("archive.zip"),
        };
        let msg = format!("{:?}", convert_extraction_error(err, Path::new("archive.zip")));
        assert!(msg.contains("archive.zip"));
        assert!(msg.contains("zstd"));
    }

    #[test]
    fn test_convert_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = ExtractionError::Io(io_err);
        let converted = convert_extraction_error(err, Path::new("archive.tar.gz"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("archive path exists"));
    }

    #[test]
    fn test_add_archive_context_passes_ok() {
        let result: Result<u8, ExtractionError> = Ok(7);
        assert_eq!(add_archive_context(result, Path::new("a.tar")).ok(), Some(7));
    }
}
