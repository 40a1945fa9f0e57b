//! Source file discovery.
//!
//! Walks the root recursively and collects every file whose name ends with the
//! source extension. Directories whose name equals the exclusion name are pruned
//! at any depth below the root; the match is on the whole component, so
//! `external_libs/` is still walked when `external` is excluded.

use crate::error::FsError;
use crate::pipeline::Config;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Collect all source files under `root`, sorted and without duplicates.
///
/// Fails only when `root` itself cannot be read. Subdirectories that cannot be
/// read during the walk are skipped with a warning.
pub fn discover_sources(root: &Path, config: &Config) -> Result<Vec<PathBuf>, FsError> {
    check_root(root)?;

    let suffix = format!(".{}", config.source_ext);
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(config.follow_links)
        .into_iter()
        .filter_entry(|e| !is_excluded(e, &config.exclude_dir));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(FsError::RootUnreadable {
                    path: root.to_path_buf(),
                    source: e.into(),
                });
            }
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.path().is_file() {
            continue;
        }
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(&suffix));
        if matches {
            debug!("discovered {}", entry.path().display());
            files.push(entry.into_path());
        }
    }

    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

fn check_root(root: &Path) -> Result<(), FsError> {
    let meta = fs::metadata(root).map_err(|source| FsError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(FsError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    fs::read_dir(root).map_err(|source| FsError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// The root is never excluded, even if its own name is the exclusion name.
fn is_excluded(entry: &DirEntry, exclude_dir: &str) -> bool {
    entry.depth() > 0 && entry.file_type().is_dir() && entry.file_name() == exclude_dir
}
