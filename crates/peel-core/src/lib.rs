//! Tar extraction with the top-level wrapper directory removed.
//!
//! `peel-core` extracts tar archives (optionally gzip, bzip2, xz or zstd
//! compressed) the way `tar --strip-components=1` does: the first path
//! component of every entry is dropped, and the wrapper root entry itself
//! is skipped.
//!
//! # Examples
//!
//! ```no_run
//! use peel_core::extract_archive;
//! use peel_core::verify_path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = extract_archive("php-8.3.26.tar", "/tmp/php-src")?;
//! println!("Extracted {} files", report.files_extracted);
//! println!("Verifying: {}", verify_path("/tmp/php-src", "main/php_version.h"));
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod archive;
pub mod config;
pub mod error;
pub mod formats;
pub mod inspection;
pub mod report;
pub mod strip;
#[doc(hidden)]
pub mod test_utils;
pub mod types;

// Re-export main API types
pub use api::extract_archive;
pub use api::extract_archive_with_progress;
pub use archive::Extractor;
pub use config::ExtractOptions;
pub use error::ExtractionError;
pub use error::Result;
pub use inspection::ArchiveManifest;
pub use inspection::ManifestEntry;
pub use inspection::VerificationOutcome;
pub use inspection::list_archive;
pub use inspection::verify_path;
pub use inspection::verify_paths;
pub use report::ExtractionReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;

pub use types::EntryType;
pub use types::TargetDir;
