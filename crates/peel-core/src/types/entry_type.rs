//! Archive entry type enumeration.

use std::io::Read;

/// Type of an entry in a tar archive.
///
/// Link targets are kept exactly as stored in the archive. For hardlinks the
/// target is another archive name and is subject to the same stripping as
/// entry names; symlink targets are filesystem paths and are left alone.
///
/// # Examples
///
/// ```
/// use peel_core::types::EntryType;
///
/// let file = EntryType::File;
/// let link = EntryType::Hardlink {
///     target: "php-8.3/main/php.h".to_string(),
/// };
/// assert!(file.is_file());
/// assert!(link.is_hardlink());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryType {
    /// Regular file entry (including contiguous and GNU sparse files).
    File,

    /// Directory entry.
    Directory,

    /// Symbolic link entry.
    Symlink {
        /// Symlink target, lossily decoded for display.
        target: String,
    },

    /// Hard link entry.
    Hardlink {
        /// Archive name of the linked entry, lossily decoded for display.
        /// Extraction reads the raw bytes from the header instead.
        target: String,
    },

    /// Device nodes, FIFOs and other entries that are not extracted.
    Other {
        /// The tar type flag byte.
        flag: u8,
    },
}

impl EntryType {
    /// Classifies a tar entry from its header.
    pub(crate) fn from_tar_entry<R: Read>(entry: &tar::Entry<'_, R>) -> Self {
        let link_target = || {
            entry
                .link_name_bytes()
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                .unwrap_or_default()
        };

        match entry.header().entry_type() {
            tar::EntryType::Regular | tar::EntryType::Continuous | tar::EntryType::GNUSparse => {
                Self::File
            }
            tar::EntryType::Directory => Self::Directory,
            tar::EntryType::Symlink => Self::Symlink {
                target: link_target(),
            },
            tar::EntryType::Link => Self::Hardlink {
                target: link_target(),
            },
            other => Self::Other {
                flag: other.as_byte(),
            },
        }
    }

    /// Returns `true` if this is a regular file.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File)
    }

    /// Returns `true` if this is a directory.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Returns `true` if this is a symlink.
    #[must_use]
    pub const fn is_symlink(&self) -> bool {
        matches!(self, Self::Symlink { .. })
    }

    /// Returns `true` if this is a hardlink.
    #[must_use]
    pub const fn is_hardlink(&self) -> bool {
        matches!(self, Self::Hardlink { .. })
    }

    /// Short lowercase label used in listings.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "dir",
            Self::Symlink { .. } => "symlink",
            Self::Hardlink { .. } => "hardlink",
            Self::Other { .. } => "other",
        }
    }
}
