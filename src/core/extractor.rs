//! Extraction run orchestration.
//!
//! The extractor holds only configuration; all run state (the usage map and
//! the visited set) is created per `run` call and threaded explicitly through
//! the traversal, so an extractor can be reused and runs stay independent.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::config::PAGES_DIR;
use crate::core::locale::LocaleKeySet;
use crate::core::resolver::ImportResolver;
use crate::core::route::derive_route;
use crate::core::scanner::{self, FileKind};
use crate::core::usage::{ScannedFileSet, UsageMap};
use crate::core::walker::walk_pages;

/// Result of one extraction run.
#[derive(Debug, Default)]
pub struct Extraction {
    pub usage: UsageMap,
    /// Files scanned: pages plus followed imports.
    pub files_scanned: usize,
    /// Files where a structural parse failed and the pattern scan ran.
    pub fallback_files: Vec<PathBuf>,
}

/// One-shot extractor over a project tree.
#[derive(Debug)]
pub struct Extractor {
    locale_keys: LocaleKeySet,
    project_root: PathBuf,
    verbose: bool,
}

impl Extractor {
    pub fn new(locale_keys: LocaleKeySet, project_root: PathBuf, verbose: bool) -> Self {
        Self {
            locale_keys,
            project_root,
            verbose,
        }
    }

    pub fn locale_keys(&self) -> &LocaleKeySet {
        &self.locale_keys
    }

    /// Walk the pages tree and its import closure, accumulating key usages.
    ///
    /// A missing pages directory is not an error: the run completes with an
    /// empty result and reports zero usage.
    pub fn run(&self) -> Extraction {
        let mut extraction = Extraction::default();

        let pages_root = self.project_root.join(PAGES_DIR);
        if !pages_root.is_dir() {
            eprintln!(
                "{} pages directory not found: {}",
                "warning:".bold().yellow(),
                pages_root.display()
            );
            return extraction;
        }

        let resolver = ImportResolver::new(self.project_root.clone());
        let mut visited = ScannedFileSet::new();

        for page in walk_pages(&pages_root, self.verbose) {
            let route = derive_route(&page.route_prefix, &page.path);
            self.scan_file(&page.path, &route, &resolver, &mut visited, &mut extraction);
        }

        extraction
    }

    /// Scan one file and recurse into its resolved imports, attributing every
    /// reference to the entry page's route.
    fn scan_file(
        &self,
        path: &Path,
        route: &str,
        resolver: &ImportResolver,
        visited: &mut ScannedFileSet,
        extraction: &mut Extraction,
    ) {
        let path = match path.canonicalize() {
            Ok(canonical) => canonical,
            Err(_) => path.to_path_buf(),
        };
        if !visited.insert(path.clone()) {
            return;
        }

        let Some(kind) = FileKind::from_path(&path) else {
            return;
        };

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                eprintln!(
                    "{} Cannot read {}: {}",
                    "warning:".bold().yellow(),
                    path.display(),
                    err
                );
                return;
            }
        };

        let outcome = scanner::scan(&content, &path, kind);
        extraction.files_scanned += 1;
        if outcome.used_fallback {
            extraction.fallback_files.push(path.clone());
        }

        for key in &outcome.keys {
            extraction.usage.record(&self.locale_keys, key, &path, route);
        }

        for specifier in &outcome.imports {
            if let Some(resolved) = resolver.resolve(specifier, &path) {
                self.scan_file(&resolved, route, resolver, visited, extraction);
            }
        }
    }
}
