//! Archive format detection.
//!
//! The compression wrapper is identified from the leading bytes of the file,
//! so archives are accepted whatever their name. An uncompressed stream must
//! start with a tar header whose checksum is valid (or an all-zero
//! end-of-archive block). The file extension is only a hint.

use std::io::Read;
use std::io::Seek;
use std::path::Path;

use tracing::debug;

use crate::ExtractionError;
use crate::Result;
use crate::formats::compression::CompressionCodec;

/// Number of leading bytes inspected: one tar header block.
pub const DETECT_LEN: usize = 512;

const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];
const BZIP2_MAGIC: &[u8] = b"BZh";
const XZ_MAGIC: &[u8] = &[0xfd, b'7', b'z', b'X', b'Z', 0x00];
const ZSTD_MAGIC: &[u8] = &[0x28, 0xb5, 0x2f, 0xfd];

/// Supported archive formats.
///
/// Every variant is a tar stream; they differ only in the compression
/// wrapper around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveType {
    /// Tar archive (uncompressed).
    Tar,
    /// Gzip-compressed tar archive.
    TarGz,
    /// Bzip2-compressed tar archive.
    TarBz2,
    /// XZ-compressed tar archive.
    TarXz,
    /// Zstd-compressed tar archive.
    TarZst,
}

impl ArchiveType {
    /// Returns the compression codec wrapped around the tar stream.
    #[must_use]
    pub const fn codec(self) -> Option<CompressionCodec> {
        match self {
            Self::Tar => None,
            Self::TarGz => Some(CompressionCodec::Gzip),
            Self::TarBz2 => Some(CompressionCodec::Bzip2),
            Self::TarXz => Some(CompressionCodec::Xz),
            Self::TarZst => Some(CompressionCodec::Zstd),
        }
    }

    /// Returns the tar variant wrapped in `codec`.
    #[must_use]
    pub const fn from_codec(codec: CompressionCodec) -> Self {
        match codec {
            CompressionCodec::Gzip => Self::TarGz,
            CompressionCodec::Bzip2 => Self::TarBz2,
            CompressionCodec::Xz => Self::TarXz,
            CompressionCodec::Zstd => Self::TarZst,
        }
    }

    /// Returns a short human-readable name such as `tar.gz`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self.codec() {
            None => "tar",
            Some(codec) => codec.extension(),
        }
    }
}

/// Identifies a compression container from its magic number.
#[must_use]
pub fn codec_from_magic(head: &[u8]) -> Option<CompressionCodec> {
    [
        (GZIP_MAGIC, CompressionCodec::Gzip),
        (BZIP2_MAGIC, CompressionCodec::Bzip2),
        (XZ_MAGIC, CompressionCodec::Xz),
        (ZSTD_MAGIC, CompressionCodec::Zstd),
    ]
    .into_iter()
    .find_map(|(magic, codec)| head.starts_with(magic).then_some(codec))
}

/// Returns `true` if `block` starts with a tar header (or an empty
/// archive's zero block).
///
/// Old v7 headers carry no `ustar` magic, so the header checksum is what
/// identifies them.
#[must_use]
pub fn is_tar_header(block: &[u8]) -> bool {
    let Some(block) = block.get(..DETECT_LEN) else {
        return false;
    };
    if block.iter().all(|&b| b == 0) {
        return true;
    }

    let mut header = tar::Header::new_old();
    header.as_mut_bytes().copy_from_slice(block);
    let Ok(stored) = header.cksum() else {
        return false;
    };
    header.set_cksum();
    header.cksum().is_ok_and(|computed| computed == stored)
}

/// Identifies the archive type from its leading bytes.
#[must_use]
pub fn detect_from_content(head: &[u8]) -> Option<ArchiveType> {
    codec_from_magic(head)
        .map(ArchiveType::from_codec)
        .or_else(|| is_tar_header(head).then_some(ArchiveType::Tar))
}

/// Guesses the archive type from a file name.
///
/// Compressed variants need either a `.tar.<ext>` double extension or the
/// short single-extension form (`.tgz`, `.tbz2`, ...).
#[must_use]
pub fn format_from_extension(path: &Path) -> Option<ArchiveType> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();

    let stem_is_tar = path
        .file_stem()
        .and_then(|stem| Path::new(stem).extension())
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("tar"));

    match (extension.as_str(), stem_is_tar) {
        ("tar", _) => Some(ArchiveType::Tar),
        ("tgz", _) | ("gz", true) => Some(ArchiveType::TarGz),
        ("tbz" | "tbz2", _) | ("bz2", true) => Some(ArchiveType::TarBz2),
        ("txz", _) | ("xz", true) => Some(ArchiveType::TarXz),
        ("tzst", _) | ("zst", true) => Some(ArchiveType::TarZst),
        _ => None,
    }
}

/// Detects the archive type of `reader` from its contents and rewinds it.
///
/// `path` is used for the error and to note a misleading extension.
///
/// # Errors
///
/// Returns `ExtractionError::UnsupportedFormat` if the data is neither a
/// known compression container nor a tar stream, and `ExtractionError::Io`
/// if the reader cannot be read or rewound.
pub fn detect_format<R: Read + Seek>(path: &Path, reader: &mut R) -> Result<ArchiveType> {
    let mut head = Vec::with_capacity(DETECT_LEN);
    reader
        .by_ref()
        .take(DETECT_LEN as u64)
        .read_to_end(&mut head)?;
    reader.rewind()?;

    let format = detect_from_content(&head).ok_or_else(|| ExtractionError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    if let Some(hint) = format_from_extension(path)
        && hint != format
    {
        debug!(
            path = %path.display(),
            extension = hint.name(),
            detected = format.name(),
            "archive contents do not match its extension"
        );
    }

    Ok(format)
}
