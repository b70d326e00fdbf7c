//! Per-file scanning: structural scan first, pattern fallback second.
//!
//! Every scan degrades rather than fails: a file whose template or script
//! cannot be parsed structurally is re-scanned with the literal call-form
//! patterns, and a file that defeats both stages contributes zero keys
//! without failing the run.

pub mod patterns;
pub mod script;
pub mod sfc;
pub mod template;

use std::path::Path;

/// How a file's content is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A `.vue` single-file component.
    Markup,
    /// A `.js`/`.ts` module.
    Script,
}

impl FileKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("vue") => Some(Self::Markup),
            Some("js" | "ts") => Some(Self::Script),
            _ => None,
        }
    }
}

/// Raw references found in one file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Translation keys referenced (may repeat; the usage map deduplicates).
    pub keys: Vec<String>,
    /// Import specifiers to follow.
    pub imports: Vec<String>,
    /// True when a structural parse failed and the pattern scan ran instead.
    pub used_fallback: bool,
}

/// Scan one file's content.
pub fn scan(content: &str, path: &Path, kind: FileKind) -> ScanOutcome {
    match kind {
        FileKind::Markup => scan_markup(content, path),
        FileKind::Script => scan_script(content, path),
    }
}

fn scan_markup(content: &str, path: &Path) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();

    let blocks = match sfc::split(content) {
        Ok(blocks) => blocks,
        Err(_) => {
            // The component structure itself is broken: pattern-scan the raw
            // text, including whatever looks like a script block.
            outcome.keys = patterns::scan_markup_text(content);
            if let Some(script_text) = patterns::extract_script_block(content) {
                outcome.keys.extend(patterns::scan_script_text(script_text));
            }
            outcome.used_fallback = true;
            return outcome;
        }
    };

    match blocks.template.as_deref().map(template::parse) {
        Some(Ok(nodes)) => {
            for expression in template::candidate_expressions(&nodes) {
                outcome.keys.extend(script::keys_in_expression(&expression));
            }
        }
        Some(Err(_)) | None => {
            outcome.keys.extend(patterns::scan_markup_text(content));
            outcome.used_fallback = true;
        }
    }

    if let Some(script_src) = blocks.script.as_deref() {
        let script_outcome = scan_script(script_src, path);
        outcome.keys.extend(script_outcome.keys);
        outcome.imports = script_outcome.imports;
        outcome.used_fallback |= script_outcome.used_fallback;
    }

    outcome
}

fn scan_script(content: &str, path: &Path) -> ScanOutcome {
    match script::collect(content, path) {
        Ok(collected) => ScanOutcome {
            keys: collected.keys,
            imports: collected.imports,
            used_fallback: false,
        },
        Err(_) => ScanOutcome {
            keys: patterns::scan_script_text(content),
            imports: Vec::new(),
            used_fallback: true,
        },
    }
}
