//! Archive listing implementation.

use std::path::Path;

use crate::Result;
use crate::formats::TarArchive;
use crate::inspection::manifest::ArchiveManifest;
use crate::inspection::manifest::ManifestEntry;
use crate::strip::path_from_bytes;
use crate::strip::strip_leading_component;

/// Lists archive contents without extracting.
///
/// Each entry records its original name and the name extraction would give
/// it. No files are written to disk. The whole archive is read (and
/// decompressed) once.
///
/// # Errors
///
/// Returns error if:
/// - Archive file cannot be opened
/// - Archive format is unsupported or corrupted
///
/// # Examples
///
/// ```no_run
/// use peel_core::list_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let manifest = list_archive("archive.tar.gz")?;
///
/// for entry in &manifest.entries {
///     match &entry.stripped {
///         Some(stripped) => println!("{} -> {}", entry.name, stripped.display()),
///         None => println!("{} (skipped)", entry.name),
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub fn list_archive<P: AsRef<Path>>(archive_path: P) -> Result<ArchiveManifest> {
    let mut archive = TarArchive::open(archive_path.as_ref())?;
    list_entries(&mut archive)
}

pub(crate) fn list_entries(archive: &mut TarArchive<'_>) -> Result<ArchiveManifest> {
    let mut manifest = ArchiveManifest::new(archive.format());

    archive.for_each_entry(|entry, raw_name, entry_type| {
        let stripped = match strip_leading_component(&raw_name).as_extract() {
            Some(bytes) => Some(path_from_bytes(bytes)?.to_path_buf()),
            None => None,
        };

        manifest.add_entry(ManifestEntry {
            size: entry.size(),
            stripped,
            entry_type,
            name: String::from_utf8_lossy(&raw_name).into_owned(),
        });
        Ok(())
    })?;

    Ok(manifest)
}
