//! Recursive file enumeration
//!
//! Shared by filter loading and input enumeration so both expand directories
//! the same way: every non-directory entry below the root, depth first, in
//! file-name order. Hidden and ignored files are not skipped.

use ignore::WalkBuilder;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    pub follow_links: bool,
}

/// Failure while expanding a root; carries the root it came from
#[derive(Debug)]
pub struct WalkError {
    pub root: PathBuf,
    pub source: io::Error,
}

/// List `root` itself when it is a file, or every file below it when it is a directory
pub fn walk_files(root: &Path, options: WalkOptions) -> Result<Vec<PathBuf>, WalkError> {
    let fail = |source: io::Error| WalkError {
        root: root.to_path_buf(),
        source,
    };

    // Roots named explicitly are always resolved; `follow_links` governs entries below them
    let metadata = std::fs::metadata(root).map_err(fail)?;
    if !metadata.is_dir() {
        return Ok(vec![root.to_path_buf()]);
    }

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(options.follow_links)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let source = match e.into_io_error() {
                Some(io_error) => io_error,
                None => io::Error::other(format!("walk of {} failed", root.display())),
            };
            fail(source)
        })?;

        let Some(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            continue;
        }
        // Unfollowed links still name their target; a linked directory is not a document
        if file_type.is_symlink() && entry.path().metadata().is_ok_and(|m| m.is_dir()) {
            tracing::debug!("Skipping linked directory {}", entry.path().display());
            continue;
        }
        files.push(entry.into_path());
    }

    tracing::trace!("Expanded {} into {} files", root.display(), files.len());
    Ok(files)
}
