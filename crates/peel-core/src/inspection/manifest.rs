//! Archive manifest types.

use std::path::PathBuf;

use crate::formats::detect::ArchiveType;
use crate::types::EntryType;

/// One archive entry as seen before extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Entry name as stored in the archive. Bytes that are not UTF-8 are
    /// replaced, so use this for display only.
    pub name: String,

    /// Path after stripping, byte-exact, or `None` for the wrapper root.
    pub stripped: Option<PathBuf>,

    /// Entry kind.
    pub entry_type: EntryType,

    /// Size of the entry data in bytes.
    pub size: u64,
}

impl ManifestEntry {
    /// Returns `true` if extraction would write this entry.
    #[must_use]
    pub const fn is_extracted(&self) -> bool {
        self.stripped.is_some() && !matches!(self.entry_type, EntryType::Other { .. })
    }
}

/// All entries of an archive, in archive order.
#[derive(Debug, Clone)]
pub struct ArchiveManifest {
    /// Archive format.
    pub format: ArchiveType,

    /// Entries in archive order.
    pub entries: Vec<ManifestEntry>,

    /// Number of entries (including skipped ones).
    pub total_entries: usize,

    /// Sum of entry sizes in bytes.
    pub total_size: u64,
}

impl ArchiveManifest {
    /// Creates an empty manifest.
    #[must_use]
    pub fn new(format: ArchiveType) -> Self {
        Self {
            format,
            entries: Vec::new(),
            total_entries: 0,
            total_size: 0,
        }
    }

    /// Appends an entry and updates the totals.
    pub fn add_entry(&mut self, entry: ManifestEntry) {
        self.total_entries += 1;
        self.total_size = self.total_size.saturating_add(entry.size);
        self.entries.push(entry);
    }

    /// Number of entries extraction would write.
    #[must_use]
    pub fn extractable_entries(&self) -> usize {
        self.entries.iter().filter(|e| e.is_extracted()).count()
    }
}
