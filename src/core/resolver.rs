//! Import specifier resolution.
//!
//! Follows the project's relative and aliased import conventions to an
//! existing file on disk. Resolution is an ordered rule table: the first rule
//! whose prefix matches and whose candidate probing finds a regular file
//! wins. Specifiers no rule can place are treated as external packages and
//! are not followed.

use std::env;
use std::path::{Path, PathBuf};

use crate::config::{CLIENT_DIR, PROJECT_MARKERS, RESOLVE_SUFFIXES, SRC_DIR};

/// Where a matching rule anchors the specifier remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleBase {
    /// Directory of the importing file; the full specifier is kept.
    ImportingDir,
    /// Detected project root.
    ProjectRoot,
    /// `src/` under the project root.
    SrcDir,
    /// `client/` under the project root.
    ClientDir,
}

/// One prefix rule in the resolution table.
#[derive(Debug, Clone, Copy)]
struct AliasRule {
    prefix: &'static str,
    base: RuleBase,
    /// Probe the joined path as-is before trying suffixes.
    probe_bare: bool,
    /// Also probe `<stem>/index` with each suffix.
    probe_index: bool,
}

/// Ordered resolution table. `@/` appears twice on purpose: it prefers
/// `src/` and falls back to `client/` when nothing exists there.
const ALIAS_RULES: &[AliasRule] = &[
    AliasRule {
        prefix: "./",
        base: RuleBase::ImportingDir,
        probe_bare: false,
        probe_index: true,
    },
    AliasRule {
        prefix: "../",
        base: RuleBase::ImportingDir,
        probe_bare: false,
        probe_index: true,
    },
    AliasRule {
        prefix: "/",
        base: RuleBase::ProjectRoot,
        probe_bare: false,
        probe_index: false,
    },
    AliasRule {
        prefix: "@/",
        base: RuleBase::SrcDir,
        probe_bare: false,
        probe_index: false,
    },
    AliasRule {
        prefix: "~/",
        base: RuleBase::ClientDir,
        probe_bare: true,
        probe_index: false,
    },
    AliasRule {
        prefix: "@/",
        base: RuleBase::ClientDir,
        probe_bare: true,
        probe_index: false,
    },
    AliasRule {
        prefix: "@",
        base: RuleBase::ClientDir,
        probe_bare: true,
        probe_index: false,
    },
];

/// Resolves import specifiers against one project root.
#[derive(Debug, Clone)]
pub struct ImportResolver {
    project_root: PathBuf,
}

impl ImportResolver {
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Resolve an import specifier to an existing file, or `None` for
    /// specifiers no rule can place (external packages).
    pub fn resolve(&self, specifier: &str, from_file: &Path) -> Option<PathBuf> {
        for rule in ALIAS_RULES {
            if !specifier.starts_with(rule.prefix) {
                continue;
            }
            let stem = self.rule_stem(rule, specifier, from_file);
            if let Some(found) = probe(&stem, rule.probe_bare, rule.probe_index) {
                // One spelling per file, so the visited set deduplicates
                // paths reached through different aliases.
                return Some(found.canonicalize().unwrap_or(found));
            }
        }
        None
    }

    fn rule_stem(&self, rule: &AliasRule, specifier: &str, from_file: &Path) -> PathBuf {
        let rest = &specifier[rule.prefix.len()..];
        match rule.base {
            RuleBase::ImportingDir => {
                let dir = from_file.parent().unwrap_or_else(|| Path::new("."));
                dir.join(specifier)
            }
            RuleBase::ProjectRoot => self.project_root.join(rest),
            RuleBase::SrcDir => self.project_root.join(SRC_DIR).join(rest),
            RuleBase::ClientDir => self.project_root.join(CLIENT_DIR).join(rest),
        }
    }
}

fn probe(stem: &Path, probe_bare: bool, probe_index: bool) -> Option<PathBuf> {
    if probe_bare && stem.is_file() {
        return Some(stem.to_path_buf());
    }

    let stem_str = stem.to_string_lossy();
    for suffix in RESOLVE_SUFFIXES {
        let candidate = PathBuf::from(format!("{}{}", stem_str, suffix));
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    if probe_index {
        for suffix in RESOLVE_SUFFIXES {
            let candidate = PathBuf::from(format!("{}/index{}", stem_str, suffix));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }

    None
}

/// Walk upward from `start` until a directory carries a project marker file.
/// Falls back to `start` when none is found.
pub fn find_project_root(start: &Path) -> PathBuf {
    let mut current = start.to_path_buf();
    loop {
        if PROJECT_MARKERS.iter().any(|m| current.join(m).is_file()) {
            return current;
        }
        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return start.to_path_buf(),
        }
    }
}

/// Project-root detection for the current session; runs once per extraction.
pub fn detect_project_root() -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_project_root(&cwd)
}
