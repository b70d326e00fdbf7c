//! Literal call-form pattern scanning.
//!
//! The fallback stage: when structural parsing fails, these patterns recover
//! plainly-spelled translation calls (`$t`, `$tc`, `$te`, `$d` with a quoted
//! literal argument) from raw text. Computed or templated arguments are
//! invisible to this stage, as they are to the structural one.

use std::sync::LazyLock;

use regex::Regex;

/// Interpolated call forms in markup: `{{ $t('key') }}`.
static MARKUP_CALL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"\{\{\s*\$t\(['"`]([^'"`]+)['"`]\)\s*\}\}"#,
        r#"\{\{\s*\$tc\(['"`]([^'"`]+)['"`]\)\s*\}\}"#,
        r#"\{\{\s*\$te\(['"`]([^'"`]+)['"`]\)\s*\}\}"#,
        r#"\{\{\s*\$d\(['"`]([^'"`]+)['"`]\)\s*\}\}"#,
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("static pattern"))
    .collect()
});

/// Bare call forms in script text: `$t('key')`.
static SCRIPT_CALL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"\$t\(['"`]([^'"`]+)['"`]\)"#,
        r#"\$tc\(['"`]([^'"`]+)['"`]\)"#,
        r#"\$te\(['"`]([^'"`]+)['"`]\)"#,
        r#"\$d\(['"`]([^'"`]+)['"`]\)"#,
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("static pattern"))
    .collect()
});

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<script[^>]*>(.*?)</script>").expect("static pattern"));

/// Keys spelled as interpolated calls anywhere in raw markup text.
pub fn scan_markup_text(content: &str) -> Vec<String> {
    collect_captures(&MARKUP_CALL_PATTERNS, content)
}

/// Keys spelled as bare calls anywhere in raw script text.
pub fn scan_script_text(content: &str) -> Vec<String> {
    collect_captures(&SCRIPT_CALL_PATTERNS, content)
}

/// The script block of a component whose structure could not be parsed.
pub fn extract_script_block(content: &str) -> Option<&str> {
    SCRIPT_BLOCK
        .captures(content)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

fn collect_captures(patterns: &[Regex], content: &str) -> Vec<String> {
    let mut keys = Vec::new();
    for pattern in patterns {
        for captures in pattern.captures_iter(content) {
            if let Some(key) = captures.get(1) {
                keys.push(key.as_str().to_string());
            }
        }
    }
    keys
}
