use crate::conf::ConfigError;
use glob::glob;
use std::path::{Path, PathBuf};

/// Discovers files matching a glob pattern relative to `root`.
///
/// Paths are returned sorted so that the merge order of policy files is
/// stable. Unreadable entries are skipped.
///
/// # Errors
///
/// Returns `ConfigError::Glob` if the pattern is malformed.
pub fn discover(root: &Path, glob_pattern: &str) -> Result<Vec<PathBuf>, ConfigError> {
    let pattern = &resolve_glob(root, glob_pattern);
    let mut paths: Vec<_> = glob(pattern)
        .map_err(|e| ConfigError::Glob {
            pattern: pattern.to_string(),
            source: e,
        })?
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect();

    paths.sort();
    Ok(paths)
}

pub fn resolve_glob(root: &Path, pattern: &str) -> String {
    root.join(pattern).to_string_lossy().into_owned()
}
