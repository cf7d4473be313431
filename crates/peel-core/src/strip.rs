//! Leading path component removal for archive entry names.
//!
//! Archive names are slash-separated regardless of platform. The rule is
//! applied to the raw name bytes: everything up to and including the first
//! `/` is dropped. A name without a separator is the wrapper root itself and
//! is not extracted at all.
//!
//! Names are never decoded as UTF-8 on the way to disk, so two names that
//! differ only in non-UTF-8 bytes stay distinct.

use std::path::Component;
use std::path::Path;

use crate::ExtractionError;
use crate::Result;

/// Outcome of stripping the first component from an entry name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrippedName<'a> {
    /// Entry is extracted under this relative name.
    Extract(&'a [u8]),
    /// Entry is the wrapper root (`"root"` or `"root/"`) and is skipped.
    SkipRoot,
}

impl<'a> StrippedName<'a> {
    /// Returns the stripped name, or `None` for a skipped root.
    #[must_use]
    pub const fn as_extract(self) -> Option<&'a [u8]> {
        match self {
            Self::Extract(name) => Some(name),
            Self::SkipRoot => None,
        }
    }

    /// Returns `true` if the entry is the wrapper root.
    #[must_use]
    pub const fn is_root(self) -> bool {
        matches!(self, Self::SkipRoot)
    }
}

/// Splits `name` on the first `/` and keeps the remainder.
///
/// # Examples
///
/// ```
/// use peel_core::strip::StrippedName;
/// use peel_core::strip::strip_leading_component;
///
/// assert_eq!(
///     strip_leading_component("php-8.3/main/php_version.h"),
///     StrippedName::Extract(b"main/php_version.h")
/// );
/// assert_eq!(strip_leading_component("php-8.3"), StrippedName::SkipRoot);
/// assert_eq!(strip_leading_component("php-8.3/"), StrippedName::SkipRoot);
/// ```
#[must_use]
pub fn strip_leading_component<N: AsRef<[u8]> + ?Sized>(name: &N) -> StrippedName<'_> {
    let name = name.as_ref();
    match name.iter().position(|&b| b == b'/') {
        Some(pos) if pos + 1 < name.len() => StrippedName::Extract(&name[pos + 1..]),
        _ => StrippedName::SkipRoot,
    }
}

/// Reinterprets raw name bytes as a path without decoding them.
///
/// # Errors
///
/// Returns `ExtractionError::InvalidArchive` on platforms whose paths must
/// be unicode when the bytes are not UTF-8.
#[cfg(unix)]
pub fn path_from_bytes(bytes: &[u8]) -> Result<&Path> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    Ok(Path::new(OsStr::from_bytes(bytes)))
}

/// Reinterprets raw name bytes as a path without decoding them.
///
/// # Errors
///
/// Returns `ExtractionError::InvalidArchive` on platforms whose paths must
/// be unicode when the bytes are not UTF-8.
#[cfg(not(unix))]
pub fn path_from_bytes(bytes: &[u8]) -> Result<&Path> {
    std::str::from_utf8(bytes).map(Path::new).map_err(|_| {
        ExtractionError::InvalidArchive(format!(
            "entry name is not valid unicode: {}",
            String::from_utf8_lossy(bytes)
        ))
    })
}

/// Checks that a stripped name stays below the directory it is joined to.
///
/// Only normal components and `.` are accepted. Absolute names (which a
/// doubled separator such as `root//etc/passwd` produces), drive prefixes
/// and `..` are rejected.
///
/// # Errors
///
/// Returns `ExtractionError::PathTraversal` for any escaping name.
pub fn validate_relative(stripped: &[u8]) -> Result<&Path> {
    let path = path_from_bytes(stripped)?;

    let escapes = path.components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });

    if escapes || stripped.contains(&0) {
        return Err(ExtractionError::PathTraversal {
            path: path.to_path_buf(),
        });
    }

    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_nested_entry() {
        assert_eq!(
            strip_leading_component("root/a.txt"),
            StrippedName::Extract(b"a.txt")
        );
        assert_eq!(
            strip_leading_component("root/sub/b.txt"),
            StrippedName::Extract(b"sub/b.txt")
        );
    }

    #[test]
    fn test_strip_only_first_separator() {
        assert_eq!(
            strip_leading_component("a/b/c/d"),
            StrippedName::Extract(b"b/c/d")
        );
    }

    #[test]
    fn test_root_entries_skipped() {
        assert!(strip_leading_component("root").is_root());
        assert!(strip_leading_component("root/").is_root());
        assert!(strip_leading_component("").is_root());
    }

    #[test]
    fn test_leading_dot_is_the_stripped_component() {
        assert_eq!(
            strip_leading_component("./root/a.txt"),
            StrippedName::Extract(b"root/a.txt")
        );
    }

    #[test]
    fn test_nested_directory_keeps_trailing_slash() {
        assert_eq!(
            strip_leading_component("root/sub/"),
            StrippedName::Extract(b"sub/")
        );
    }

    #[test]
    fn test_as_extract() {
        assert_eq!(StrippedName::Extract(b"a").as_extract(), Some(&b"a"[..]));
        assert_eq!(StrippedName::SkipRoot.as_extract(), None);
    }

    #[test]
    fn test_validate_relative_accepts_nested() {
        let path = validate_relative(b"sub/dir/file.txt").unwrap();
        assert_eq!(path, Path::new("sub/dir/file.txt"));
        assert!(validate_relative(b"./file.txt").is_ok());
    }

    #[test]
    fn test_validate_relative_rejects_parent() {
        for name in ["../etc/passwd", "sub/../../x", ".."] {
            assert!(
                matches!(
                    validate_relative(name.as_bytes()),
                    Err(ExtractionError::PathTraversal { .. })
                ),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_doubled_separator_yields_absolute_name() {
        let stripped = strip_leading_component("root//etc/passwd")
            .as_extract()
            .unwrap();
        assert_eq!(stripped, b"/etc/passwd");

        #[cfg(unix)]
        assert!(matches!(
            validate_relative(stripped),
            Err(ExtractionError::PathTraversal { .. })
        ));
    }

    #[test]
    fn test_strip_keeps_non_utf8_bytes() {
        assert_eq!(
            strip_leading_component(b"root/\xff.txt"),
            StrippedName::Extract(b"\xff.txt")
        );
        assert_eq!(strip_leading_component(b"\xfe\xff"), StrippedName::SkipRoot);
    }

    #[test]
    #[cfg(unix)]
    fn test_non_utf8_names_stay_distinct() {
        use std::os::unix::ffi::OsStrExt;

        let first = validate_relative(b"\xff.txt").unwrap();
        let second = validate_relative(b"\xfe.txt").unwrap();

        assert_ne!(first, second);
        assert_eq!(first.as_os_str().as_bytes(), b"\xff.txt");
    }

    #[test]
    fn test_validate_relative_rejects_nul() {
        assert!(matches!(
            validate_relative(b"a\0b"),
            Err(ExtractionError::PathTraversal { .. })
        ));
    }
}
