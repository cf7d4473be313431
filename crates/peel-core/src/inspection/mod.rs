//! Archive inspection and post-extraction checks.
//!
//! # Examples
//!
//! ```no_run
//! use peel_core::list_archive;
//! use peel_core::verify_path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = list_archive("php-8.3.26.tar")?;
//! println!("Archive contains {} entries", manifest.total_entries);
//!
//! let present = verify_path("/tmp/php-src", "main/php_version.h");
//! println!("Verifying: {present}");
//! # Ok(())
//! # }
//! ```

pub mod list;
pub mod manifest;
pub mod verify;

pub use list::list_archive;
pub use manifest::ArchiveManifest;
pub use manifest::ManifestEntry;
pub use verify::VerificationOutcome;
pub use verify::verify_path;
pub use verify::verify_paths;
