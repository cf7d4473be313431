//! Test utilities for building tar archives.
//!
//! Archives are assembled in memory with `tar::Builder` and optionally
//! written to disk with the compression wrapper matching the file name.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::formats::compression::CompressionCodec;
use crate::formats::detect::format_from_extension;

/// Builder for creating TAR test archives with various entry types.
///
/// # Examples
///
/// ```
/// use peel_core::test_utils::TarTestBuilder;
///
/// let tar_data = TarTestBuilder::new()
///     .add_directory("root/")
///     .add_file("root/file.txt", b"content")
///     .add_symlink("root/link", "file.txt")
///     .build();
/// ```
pub struct TarTestBuilder {
    builder: tar::Builder<Vec<u8>>,
}

impl TarTestBuilder {
    /// Creates a new TAR test builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: tar::Builder::new(Vec::new()),
        }
    }

    /// Adds a regular file to the archive.
    #[must_use]
    pub fn add_file(self, path: &str, data: &[u8]) -> Self {
        self.add_file_with_mode(path, data, 0o644)
    }

    /// Adds a regular file with custom mode.
    #[must_use]
    pub fn add_file_with_mode(mut self, path: &str, data: &[u8], mode: u32) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(mode);
        header.set_cksum();
        self.builder.append_data(&mut header, path, data).unwrap();
        self
    }

    /// Adds a regular file whose name is written verbatim into the header.
    ///
    /// `tar::Builder` normalizes names and refuses `..`, so entries that
    /// exercise path validation or non-UTF-8 names have to bypass it. The
    /// name must fit the 100-byte ustar name field.
    #[must_use]
    pub fn add_file_raw_name<N: AsRef<[u8]>>(mut self, name: N, data: &[u8]) -> Self {
        let mut header = tar::Header::new_old();
        let bytes = name.as_ref();
        header.as_old_mut().name[..bytes.len()].copy_from_slice(bytes);
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_entry_type(tar::EntryType::Regular);
        header.set_cksum();
        self.builder.append(&header, data).unwrap();
        self
    }

    /// Adds a directory to the archive.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o755);
        header.set_entry_type(tar::EntryType::Directory);
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }

    /// Adds a symlink to the archive.
    #[must_use]
    pub fn add_symlink(mut self, path: &str, target: &str) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o777);
        header.set_entry_type(tar::EntryType::Symlink);
        header.set_link_name(target).unwrap();
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }

    /// Adds a hardlink to the archive.
    #[must_use]
    pub fn add_hardlink(mut self, path: &str, target: &str) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o644);
        header.set_entry_type(tar::EntryType::Link);
        header.set_link_name(target).unwrap();
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }

    /// Adds a FIFO entry, which extraction skips.
    #[must_use]
    pub fn add_fifo(mut self, path: &str) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o644);
        header.set_entry_type(tar::EntryType::Fifo);
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }

    /// Builds and returns the TAR archive data.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.builder.into_inner().unwrap()
    }

    /// Builds the archive and writes it to `dir/file_name`, compressed
    /// according to the file extension.
    pub fn write_to(self, dir: &Path, file_name: &str) -> PathBuf {
        write_archive(dir, file_name, &self.build())
    }
}

impl Default for TarTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes raw tar bytes to `dir/file_name`, applying the compression
/// codec implied by the file name. Unknown names are written uncompressed.
pub fn write_archive(dir: &Path, file_name: &str, tar_data: &[u8]) -> PathBuf {
    let codec = format_from_extension(Path::new(file_name)).and_then(|f| f.codec());
    write_archive_with(dir, file_name, tar_data, codec)
}

/// Writes raw tar bytes to `dir/file_name` wrapped in `codec`, whatever the
/// file name says.
pub fn write_archive_with(
    dir: &Path,
    file_name: &str,
    tar_data: &[u8],
    codec: Option<CompressionCodec>,
) -> PathBuf {
    let path = dir.join(file_name);

    let bytes = match codec {
        None => tar_data.to_vec(),
        Some(CompressionCodec::Gzip) => {
            let mut encoder =
                flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(tar_data).unwrap();
            encoder.finish().unwrap()
        }
        Some(CompressionCodec::Bzip2) => {
            let mut encoder =
                bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
            encoder.write_all(tar_data).unwrap();
            encoder.finish().unwrap()
        }
        Some(CompressionCodec::Xz) => {
            let mut encoder = xz2::write::XzEncoder::new(Vec::new(), 6);
            encoder.write_all(tar_data).unwrap();
            encoder.finish().unwrap()
        }
        Some(CompressionCodec::Zstd) => zstd::encode_all(tar_data, 3).unwrap(),
    };

    fs::write(&path, bytes).unwrap();
    path
}

/// Archive with a `wrapperdir/` root used across tests.
#[must_use]
pub fn wrapped_sample() -> Vec<u8> {
    TarTestBuilder::new()
        .add_directory("wrapperdir/")
        .add_file("wrapperdir/README", b"readme")
        .add_directory("wrapperdir/main/")
        .add_file("wrapperdir/main/version.txt", b"8.3.26")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_tar_builder() {
        let tar_data = TarTestBuilder::new()
            .add_file("file.txt", b"content")
            .add_directory("dir/")
            .build();
        assert!(!tar_data.is_empty());
    }

    #[test]
    fn test_raw_name_is_preserved() {
        let tar_data = TarTestBuilder::new()
            .add_file_raw_name("root/../escape.txt", b"x")
            .build();

        let mut archive = tar::Archive::new(tar_data.as_slice());
        let entry = archive.entries().unwrap().next().unwrap().unwrap();
        assert_eq!(&*entry.path_bytes(), b"root/../escape.txt");
    }

    #[test]
    fn test_write_to_compresses_by_extension() {
        let temp = TempDir::new().unwrap();
        let plain = TarTestBuilder::new()
            .add_file("root/a.txt", b"a")
            .write_to(temp.path(), "plain.tar");
        let gz = TarTestBuilder::new()
            .add_file("root/a.txt", b"a")
            .write_to(temp.path(), "packed.tar.gz");

        let gz_bytes = fs::read(gz).unwrap();
        assert_eq!(&gz_bytes[..2], &[0x1f, 0x8b]);
        assert!(fs::read(plain).unwrap().len() >= 1024);
    }
}
