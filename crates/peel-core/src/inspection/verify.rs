//! Post-extraction existence checks.

use std::path::Path;
use std::path::PathBuf;

use tracing::debug;

/// Result of checking one expected path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOutcome {
    /// Path relative to the target directory.
    pub path: PathBuf,

    /// Whether the path exists.
    pub exists: bool,
}

/// Reports whether `relative_path` exists inside `target_dir`.
///
/// Absence is a plain `false`, never an error. Symlinks are followed, so a
/// dangling link counts as absent.
///
/// # Examples
///
/// ```no_run
/// use peel_core::verify_path;
///
/// let ok = verify_path("/tmp/php-src", "main/php_version.h");
/// println!("Verifying: {ok}");
/// ```
pub fn verify_path<P: AsRef<Path>, Q: AsRef<Path>>(target_dir: P, relative_path: Q) -> bool {
    let full = target_dir.as_ref().join(relative_path.as_ref());
    let exists = full.exists();
    debug!(path = %full.display(), exists, "verified");
    exists
}

/// Checks each of `relative_paths`, preserving their order.
pub fn verify_paths<P, I, Q>(target_dir: P, relative_paths: I) -> Vec<VerificationOutcome>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = Q>,
    Q: AsRef<Path>,
{
    let target_dir = target_dir.as_ref();
    relative_paths
        .into_iter()
        .map(|relative| {
            let path = relative.as_ref().to_path_buf();
            let exists = verify_path(target_dir, &path);
            VerificationOutcome { path, exists }
        })
        .collect()
}
