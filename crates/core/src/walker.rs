//! Local tree walking
//!
//! Enumerates every regular file under a directory, producing paths
//! relative to that directory with `/` separators so they can be joined
//! onto remote key prefixes directly.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::Result;

/// Enumerate all regular files under `root` as `/`-separated relative paths.
///
/// Order is filesystem traversal order, not sorted.
pub fn walk_relative_files(root: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        files.push(relative.to_string_lossy().replace('\\', "/"));
    }
    Ok(files)
}
