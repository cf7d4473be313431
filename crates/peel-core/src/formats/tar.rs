//! Tar archive format handler.
//!
//! Entries are processed strictly in archive order, one at a time. Each
//! entry name loses its first component before it is joined to the target
//! directory; the wrapper root itself is skipped.

use std::fs;
use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use tracing::debug;
use tracing::trace;
use tracing::warn;

use crate::ExtractionError;
use crate::ExtractionReport;
use crate::ProgressCallback;
use crate::Result;
use crate::formats::detect::ArchiveType;
use crate::formats::detect::detect_format;
use crate::strip::StrippedName;
use crate::strip::strip_leading_component;
use crate::strip::validate_relative;
use crate::types::EntryType;
use crate::types::TargetDir;

use super::traits::ArchiveFormat;

/// Tar archive handler, possibly reading through a decompressor.
pub struct TarArchive<'a> {
    archive: tar::Archive<Box<dyn Read + 'a>>,
    format: ArchiveType,
}

impl TarArchive<'static> {
    /// Opens the archive at `path`, choosing the decompressor from the
    /// file's leading bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or its contents are
    /// neither a tar stream nor a supported compression container.
    pub fn open(path: &Path) -> Result<Self> {
        let mut file = File::open(path).map_err(|e| {
            ExtractionError::Io(io::Error::new(
                e.kind(),
                format!("failed to open archive {}: {e}", path.display()),
            ))
        })?;
        let format = detect_format(path, &mut file)?;
        Self::from_reader(BufReader::new(file), format)
    }
}

impl<'a> TarArchive<'a> {
    /// Wraps an already opened stream of the given format.
    ///
    /// # Errors
    ///
    /// Returns an error if the decompressor cannot be initialized.
    pub fn from_reader<R: Read + 'a>(reader: R, format: ArchiveType) -> Result<Self> {
        let reader: Box<dyn Read + 'a> = match format.codec() {
            None => Box::new(reader),
            Some(codec) => codec.decoder(reader)?,
        };

        let mut archive = tar::Archive::new(reader);
        archive.set_overwrite(true);

        Ok(Self { archive, format })
    }

    /// Returns the detected archive format.
    #[must_use]
    pub const fn format(&self) -> ArchiveType {
        self.format
    }

    /// Iterates the archive, handing each entry, its raw name bytes and its
    /// classification to `visit`.
    pub(crate) fn for_each_entry<F>(&mut self, mut visit: F) -> Result<()>
    where
        F: FnMut(&mut tar::Entry<'_, Box<dyn Read + 'a>>, Vec<u8>, EntryType) -> Result<()>,
    {
        let entries = self
            .archive
            .entries()
            .map_err(|e| ExtractionError::InvalidArchive(format!("failed to read TAR entries: {e}")))?;

        for entry_result in entries {
            let mut entry = entry_result.map_err(|e| {
                ExtractionError::InvalidArchive(format!("failed to read TAR entry: {e}"))
            })?;
            let name = entry.path_bytes().into_owned();
            let entry_type = EntryType::from_tar_entry(&entry);
            visit(&mut entry, name, entry_type)?;
        }

        Ok(())
    }
}

impl ArchiveFormat for TarArchive<'_> {
    fn extract(
        &mut self,
        target: &TargetDir,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ExtractionReport> {
        let start = Instant::now();
        let mut report = ExtractionReport::new();
        let mut position = 0usize;

        self.for_each_entry(|entry, raw_name, entry_type| {
            position += 1;
            let name = String::from_utf8_lossy(&raw_name);

            let Some(stripped) = strip_leading_component(&raw_name).as_extract() else {
                trace!(entry = %name, "skipping wrapper root");
                report.entries_skipped += 1;
                return Ok(());
            };

            if let EntryType::Other { flag } = entry_type {
                warn!(entry = %name, flag, "skipping unsupported entry type");
                report.add_warning(format!(
                    "skipped {name}: unsupported entry type '{}'",
                    char::from(flag)
                ));
                report.entries_skipped += 1;
                return Ok(());
            }

            let relative: PathBuf = validate_relative(stripped)?.components().collect();
            let destination = target.as_path().join(&relative);

            progress.on_entry_start(&relative, position);
            ensure_parent(&destination)?;

            match &entry_type {
                EntryType::Directory => {
                    unpack(entry, &destination, &name)?;
                    report.directories_created += 1;
                }
                EntryType::File => {
                    let size = entry.size();
                    unpack(entry, &destination, &name)?;
                    report.files_extracted += 1;
                    report.bytes_written = report.bytes_written.saturating_add(size);
                    progress.on_bytes_written(size);
                }
                EntryType::Symlink { .. } => {
                    remove_existing(&destination)?;
                    unpack(entry, &destination, &name)?;
                    report.symlinks_created += 1;
                }
                EntryType::Hardlink { .. } => {
                    let link = entry.link_name_bytes().unwrap_or_default().into_owned();
                    let source = hardlink_source(target, &link, &name)?;
                    remove_existing(&destination)?;
                    fs::hard_link(&source, &destination).map_err(|e| {
                        with_entry_context(&e, &name, "failed to create hardlink")
                    })?;
                    report.hardlinks_created += 1;
                }
                EntryType::Other { .. } => return Ok(()),
            }

            debug!(entry = %name, path = %relative.display(), kind = entry_type.label(), "extracted");
            progress.on_entry_complete(&relative);
            report.extracted.push(relative);
            Ok(())
        })?;

        progress.on_complete();
        report.duration = start.elapsed();
        Ok(report)
    }

    fn format_name(&self) -> &str {
        self.format.name()
    }
}

fn unpack<R: Read>(entry: &mut tar::Entry<'_, R>, destination: &Path, name: &str) -> Result<()> {
    entry
        .unpack(destination)
        .map_err(|e| with_entry_context(&e, name, "failed to extract"))?;
    Ok(())
}

fn ensure_parent(destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Links and files left by a previous run are replaced; directories are
/// never removed.
fn remove_existing(path: &Path) -> Result<()> {
    if let Ok(meta) = fs::symlink_metadata(path)
        && !meta.is_dir()
    {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Hardlink targets name another archive entry, so they carry the same
/// wrapper component as entry names.
fn hardlink_source(target: &TargetDir, link: &[u8], entry_name: &str) -> Result<PathBuf> {
    match strip_leading_component(link) {
        StrippedName::Extract(stripped) => target.join_stripped(stripped),
        StrippedName::SkipRoot => Err(ExtractionError::InvalidArchive(format!(
            "hardlink {entry_name} points at the archive root '{}'",
            String::from_utf8_lossy(link)
        ))),
    }
}

fn with_entry_context(err: &io::Error, name: &str, action: &str) -> ExtractionError {
    ExtractionError::Io(io::Error::new(err.kind(), format!("{action} {name}: {err}")))
}
