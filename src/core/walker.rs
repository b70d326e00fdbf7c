//! Pages-tree traversal.

use std::path::{Path, PathBuf};

use colored::Colorize;
use walkdir::WalkDir;

use crate::config::SCANNABLE_EXTENSIONS;

/// One scannable file found under the pages root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFile {
    pub path: PathBuf,
    /// Directory path relative to the pages root, `/`-joined; empty at the
    /// root.
    pub route_prefix: String,
}

/// Walk the pages tree depth-first and collect scannable page files.
///
/// Directories are traversed transparently and never emitted; only files on
/// the extension allow-list appear in the result. Entries that cannot be
/// accessed are reported and skipped. Traversal order is deterministic so
/// repeated runs attribute shared components to the same entry page.
pub fn walk_pages(pages_root: &Path, verbose: bool) -> Vec<PageFile> {
    let mut pages = Vec::new();

    for entry in WalkDir::new(pages_root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), err);
                }
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() || !is_scannable(path) {
            continue;
        }

        let route_prefix = path
            .parent()
            .and_then(|dir| dir.strip_prefix(pages_root).ok())
            .map(|rel| {
                rel.components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .unwrap_or_default();

        pages.push(PageFile {
            path: path.to_path_buf(),
            route_prefix,
        });
    }

    pages
}

/// Whether a file's extension is on the scan allow-list.
pub fn is_scannable(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if SCANNABLE_EXTENSIONS.contains(&ext)
    )
}
