//! Integration tests for peel-core.
//!
//! These tests verify end-to-end workflows with real filesystem operations.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use peel_core::ExtractionError;
use peel_core::extract_archive;
use peel_core::formats::compression::CompressionCodec;
use peel_core::formats::detect::ArchiveType;
use peel_core::list_archive;
use peel_core::test_utils::TarTestBuilder;
use peel_core::test_utils::wrapped_sample;
use peel_core::test_utils::write_archive;
use peel_core::test_utils::write_archive_with;
use peel_core::verify_path;
use peel_core::verify_paths;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

/// Relative paths of everything below `root`, sorted.
fn tree(root: &Path) -> BTreeSet<PathBuf> {
    fn walk(root: &Path, dir: &Path, out: &mut BTreeSet<PathBuf>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            out.insert(path.strip_prefix(root).unwrap().to_path_buf());
            if path.is_dir() {
                walk(root, &path, out);
            }
        }
    }

    let mut out = BTreeSet::new();
    walk(root, root, &mut out);
    out
}

#[test]
fn test_concrete_example_layout() {
    let temp = TempDir::new().unwrap();
    let archive = TarTestBuilder::new()
        .add_file("root/a.txt", b"a")
        .add_file("root/sub/b.txt", b"b")
        .write_to(temp.path(), "example.tar");
    let out = temp.path().join("D");

    extract_archive(&archive, &out).unwrap();

    assert_eq!(
        tree(&out),
        BTreeSet::from([
            PathBuf::from("a.txt"),
            PathBuf::from("sub"),
            PathBuf::from("sub/b.txt"),
        ])
    );
    assert!(!out.join("root").exists());
}

#[test]
fn test_verification_scenario() {
    let temp = TempDir::new().unwrap();
    let archive = write_archive(temp.path(), "php.tar", &wrapped_sample());
    let out = temp.path().join("php-src");

    extract_archive(&archive, &out).unwrap();

    assert!(out.join("main/version.txt").exists());
    assert!(verify_path(&out, "main/version.txt"));
    assert!(!verify_path(&out, "wrapperdir/main/version.txt"));
}

#[test]
fn test_root_file_never_created() {
    let temp = TempDir::new().unwrap();
    let archive = TarTestBuilder::new()
        .add_file("LICENSE", b"top-level file without a wrapper")
        .add_file("root/a.txt", b"a")
        .write_to(temp.path(), "mixed.tar");
    let out = temp.path().join("out");

    let report = extract_archive(&archive, &out).unwrap();

    assert!(!out.join("LICENSE").exists());
    assert_eq!(report.entries_skipped, 1);
    assert_eq!(tree(&out), BTreeSet::from([PathBuf::from("a.txt")]));
}

#[test]
fn test_extraction_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let archive = write_archive(temp.path(), "php.tar.gz", &wrapped_sample());
    let out = temp.path().join("out");

    extract_archive(&archive, &out).unwrap();
    let first = tree(&out);
    let first_content = fs::read(out.join("main/version.txt")).unwrap();

    extract_archive(&archive, &out).unwrap();

    assert_eq!(tree(&out), first);
    assert_eq!(fs::read(out.join("main/version.txt")).unwrap(), first_content);
}

#[test]
#[cfg(unix)]
fn test_links_survive_second_run() {
    let temp = TempDir::new().unwrap();
    let archive = TarTestBuilder::new()
        .add_file("root/a.txt", b"a")
        .add_symlink("root/soft", "a.txt")
        .add_hardlink("root/hard", "root/a.txt")
        .write_to(temp.path(), "links.tar");
    let out = temp.path().join("out");

    extract_archive(&archive, &out).unwrap();
    let report = extract_archive(&archive, &out).unwrap();

    assert_eq!(report.symlinks_created, 1);
    assert_eq!(report.hardlinks_created, 1);
    assert_eq!(fs::read_to_string(out.join("soft")).unwrap(), "a");
    assert_eq!(fs::read_to_string(out.join("hard")).unwrap(), "a");
}

#[test]
fn test_existing_target_directory_accepted() {
    let temp = TempDir::new().unwrap();
    let archive = write_archive(temp.path(), "php.tar", &wrapped_sample());
    let out = temp.path().join("out");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("unrelated.txt"), "keep me").unwrap();

    extract_archive(&archive, &out).unwrap();

    assert_eq!(
        fs::read_to_string(out.join("unrelated.txt")).unwrap(),
        "keep me"
    );
    assert!(out.join("README").exists());
}

#[test]
fn test_every_codec() {
    let temp = TempDir::new().unwrap();

    for name in [
        "a.tar",
        "a.tar.gz",
        "a.tgz",
        "a.tar.bz2",
        "a.tar.xz",
        "a.tar.zst",
    ] {
        let archive = write_archive(temp.path(), name, &wrapped_sample());
        let out = temp.path().join(format!("out-{name}"));

        extract_archive(&archive, &out).unwrap_or_else(|e| panic!("{name}: {e}"));
        assert!(verify_path(&out, "main/version.txt"), "{name}");
    }
}

#[test]
fn test_archive_without_extension() {
    let temp = TempDir::new().unwrap();
    let archive = write_archive(temp.path(), "php-8.3.26-download", &wrapped_sample());
    let out = temp.path().join("out");

    extract_archive(&archive, &out).unwrap();

    assert!(verify_path(&out, "main/version.txt"));
    assert_eq!(list_archive(&archive).unwrap().format, ArchiveType::Tar);
}

#[test]
fn test_compression_detected_from_content() {
    let temp = TempDir::new().unwrap();

    for (name, codec, format) in [
        ("php-8.3.26.tar", CompressionCodec::Gzip, ArchiveType::TarGz),
        ("php-8.3.26.tar.gz", CompressionCodec::Zstd, ArchiveType::TarZst),
        ("php-8.3.26.tgz", CompressionCodec::Xz, ArchiveType::TarXz),
        ("php-8.3.26.bin", CompressionCodec::Bzip2, ArchiveType::TarBz2),
    ] {
        let archive = write_archive_with(temp.path(), name, &wrapped_sample(), Some(codec));
        let out = temp.path().join(format!("out-{name}"));

        extract_archive(&archive, &out).unwrap_or_else(|e| panic!("{name}: {e}"));
        assert!(verify_path(&out, "main/version.txt"), "{name}");
        assert_eq!(list_archive(&archive).unwrap().format, format, "{name}");
    }
}

#[test]
#[cfg(unix)]
fn test_non_utf8_names_extract_separately() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp = TempDir::new().unwrap();
    let archive = TarTestBuilder::new()
        .add_file_raw_name(b"root/\xff.txt", b"one")
        .add_file_raw_name(b"root/\xfe.txt", b"two")
        .write_to(temp.path(), "latin1.tar");
    let out = temp.path().join("out");

    let report = extract_archive(&archive, &out).unwrap();

    assert_eq!(report.files_extracted, 2);
    assert_eq!(fs::read(out.join(OsStr::from_bytes(b"\xff.txt"))).unwrap(), b"one");
    assert_eq!(fs::read(out.join(OsStr::from_bytes(b"\xfe.txt"))).unwrap(), b"two");
    assert_eq!(fs::read_dir(&out).unwrap().count(), 2);
}

#[test]
fn test_unwritable_target_fails() {
    let temp = TempDir::new().unwrap();
    let archive = write_archive(temp.path(), "php.tar", &wrapped_sample());

    // A regular file where a parent directory should be cannot be created
    // through, regardless of the user's privileges.
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "file").unwrap();

    let result = extract_archive(&archive, blocker.join("out"));
    assert!(matches!(result, Err(ExtractionError::Io(_))));
}

#[test]
#[cfg(unix)]
fn test_read_only_target_fails() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let archive = write_archive(temp.path(), "php.tar", &wrapped_sample());
    let out = temp.path().join("readonly");
    fs::create_dir(&out).unwrap();
    fs::set_permissions(&out, fs::Permissions::from_mode(0o555)).unwrap();

    // Privileged users ignore directory permissions.
    let marker = out.join(".writable");
    if fs::write(&marker, "").is_ok() {
        fs::remove_file(&marker).unwrap();
        fs::set_permissions(&out, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = extract_archive(&archive, &out);
    fs::set_permissions(&out, fs::Permissions::from_mode(0o755)).unwrap();

    let err = result.expect_err("extraction into a read-only directory must fail");
    assert_eq!(err.io_kind(), Some(std::io::ErrorKind::PermissionDenied));
}

#[test]
fn test_corrupt_archive_fails() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("corrupt.tar.gz");
    fs::write(&archive, b"this is not gzip data").unwrap();

    let result = extract_archive(&archive, temp.path().join("out"));
    assert!(result.is_err());
}

#[test]
fn test_list_matches_extraction() {
    let temp = TempDir::new().unwrap();
    let archive = write_archive(temp.path(), "php.tar", &wrapped_sample());
    let out = temp.path().join("out");

    let manifest = list_archive(&archive).unwrap();
    let report = extract_archive(&archive, &out).unwrap();

    let listed: Vec<PathBuf> = manifest
        .entries
        .iter()
        .filter(|e| e.is_extracted())
        .filter_map(|e| e.stripped.as_deref())
        .map(|s| s.components().collect())
        .collect();
    assert_eq!(listed, report.extracted);
    assert_eq!(manifest.extractable_entries(), report.total_items());
}

#[test]
fn test_verify_paths_after_extraction() {
    let temp = TempDir::new().unwrap();
    let archive = write_archive(temp.path(), "php.tar", &wrapped_sample());
    let out = temp.path().join("out");
    extract_archive(&archive, &out).unwrap();

    let outcomes = verify_paths(&out, ["README", "main/php_version.h"]);
    assert!(outcomes[0].exists);
    assert!(!outcomes[1].exists);
}
