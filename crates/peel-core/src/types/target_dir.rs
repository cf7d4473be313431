//! Extraction target directory.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use crate::ExtractionError;
use crate::Result;
use crate::strip::validate_relative;

/// A directory that extracted entries are written into.
///
/// Construction creates the directory (and any missing parents) and
/// canonicalizes it. Creation is idempotent: an existing directory is
/// accepted as-is.
///
/// # Examples
///
/// ```no_run
/// use peel_core::types::TargetDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let target = TargetDir::ensure("/tmp/php-src")?;
/// println!("Extracting to: {}", target.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDir(PathBuf);

impl TargetDir {
    /// Creates the directory if needed and returns its canonical form.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::Io` if:
    /// - the directory (or one of its parents) cannot be created
    /// - the path exists but is not a directory
    /// - the path cannot be canonicalized
    pub fn ensure(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        fs::create_dir_all(path).map_err(|e| {
            ExtractionError::Io(io::Error::new(
                e.kind(),
                format!("failed to create target directory {}: {e}", path.display()),
            ))
        })?;

        // create_dir_all succeeds on an existing symlink to a file on some
        // platforms, so check the resolved type as well.
        if !path.is_dir() {
            return Err(ExtractionError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("target is not a directory: {}", path.display()),
            )));
        }

        let canonical = path.canonicalize().map_err(|e| {
            ExtractionError::Io(io::Error::new(
                e.kind(),
                format!("failed to canonicalize path {}: {e}", path.display()),
            ))
        })?;

        Ok(Self(canonical))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins a stripped entry name to this directory.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::PathTraversal` if the name would escape
    /// the directory.
    pub fn join_stripped(&self, stripped: &[u8]) -> Result<PathBuf> {
        let relative = validate_relative(stripped)?;
        Ok(self.0.join(relative))
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_existing_directory() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let target = TargetDir::ensure(temp.path()).expect("existing dir should be accepted");
        assert!(target.as_path().is_absolute());
        assert_eq!(target.as_path(), temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_ensure_creates_missing_parents() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let nested = temp.path().join("a").join("b").join("c");

        let target = TargetDir::ensure(&nested).expect("nested dir should be created");
        assert!(nested.is_dir());
        assert!(target.as_path().ends_with("a/b/c"));
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let path = temp.path().join("out");

        let first = TargetDir::ensure(&path).unwrap();
        let second = TargetDir::ensure(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_ensure_rejects_file() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let file_path = temp.path().join("file.txt");
        fs::write(&file_path, "test").expect("failed to write file");

        let result = TargetDir::ensure(&file_path);
        assert!(matches!(result, Err(ExtractionError::Io(_))));
    }

    #[test]
    fn test_ensure_below_file_fails() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let file_path = temp.path().join("file.txt");
        fs::write(&file_path, "test").expect("failed to write file");

        let result = TargetDir::ensure(file_path.join("sub"));
        assert!(matches!(result, Err(ExtractionError::Io(_))));
    }

    #[test]
    fn test_join_stripped() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let target = TargetDir::ensure(temp.path()).unwrap();

        let joined = target.join_stripped(b"main/version.txt").unwrap();
        assert!(joined.starts_with(target.as_path()));
        assert!(joined.ends_with("main/version.txt"));

        assert!(matches!(
            target.join_stripped(b"../escape.txt"),
            Err(ExtractionError::PathTraversal { .. })
        ));
    }

    #[test]
    fn test_into_path_buf() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let target = TargetDir::ensure(temp.path()).unwrap();
        let path = target.clone().into_path_buf();
        assert_eq!(path, target.as_path());
    }
}
