//! Console summary and JSON usage report.
//!
//! Separate from the extraction engine so routekey can be used as a library.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::core::{Extraction, LocaleKeySet, UsageMap};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Placeholder trading-pair segment substituted for dynamic market suffixes.
const PAIR_PLACEHOLDER: &str = "BTC-USDT";

/// Dynamic-segment suffixes rewritten to the pair placeholder.
const PAIR_SUFFIXES: &[&str] = &["_id", "_coin", "_contract"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub i18n_file: String,
    pub generated_at: String,
    pub total_keys: usize,
    pub used_keys: usize,
    pub unused_keys: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatistics {
    pub total_keys: usize,
    pub used_keys: usize,
    pub unused_keys: usize,
    pub usage_rate: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyUsage {
    pub key: String,
    pub routes: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
    pub keys_with_multiple_routes: usize,
    pub keys_with_multiple_pages: usize,
}

/// The JSON document written with `-o`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    pub metadata: ReportMetadata,
    pub statistics: ReportStatistics,
    pub key_usage: Vec<KeyUsage>,
    pub summary: ReportTotals,
}

/// Assemble the report document for one extraction run.
pub fn build_report(
    usage: &UsageMap,
    keys: &LocaleKeySet,
    i18n_file: &str,
    generated_at: DateTime<Utc>,
) -> UsageReport {
    let total = keys.len();
    let used = usage.len();
    let unused = total - used;

    UsageReport {
        metadata: ReportMetadata {
            i18n_file: i18n_file.to_string(),
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            total_keys: total,
            used_keys: used,
            unused_keys: unused,
        },
        statistics: ReportStatistics {
            total_keys: total,
            used_keys: used,
            unused_keys: unused,
            usage_rate: usage_rate(used, total),
        },
        key_usage: usage
            .iter()
            .map(|(key, entry)| KeyUsage {
                key: key.to_string(),
                routes: entry.routes.iter().map(|route| display_route(route)).collect(),
            })
            .collect(),
        summary: ReportTotals {
            keys_with_multiple_routes: usage.iter().filter(|(_, e)| e.routes.len() > 1).count(),
            keys_with_multiple_pages: usage.iter().filter(|(_, e)| e.pages.len() > 1).count(),
        },
    }
}

/// `"NN.NN%"`; an empty key set reports `0.00%`.
pub fn usage_rate(used: usize, total: usize) -> String {
    if total == 0 {
        return "0.00%".to_string();
    }
    format!("{:.2}%", used as f64 / total as f64 * 100.0)
}

/// Rewrite a derived route for display: keep the part after the language
/// segment (`:lang`, then the raw `_lang` spelling) and substitute the
/// dynamic market suffixes with a concrete pair.
pub fn display_route(route: &str) -> String {
    let mut shown = route
        .split_once(":lang")
        .map(|(_, rest)| rest.to_string())
        .unwrap_or_default();
    if shown.is_empty() {
        shown = route
            .split_once("_lang")
            .map(|(_, rest)| rest.to_string())
            .unwrap_or_default();
    }

    for suffix in PAIR_SUFFIXES {
        if shown.ends_with(suffix) {
            shown.truncate(shown.len() - suffix.len());
            shown.push_str(PAIR_PLACEHOLDER);
            break;
        }
    }
    shown
}

/// Print the human-readable run summary.
pub fn print_summary(extraction: &Extraction, keys: &LocaleKeySet) {
    print_summary_to(extraction, keys, &mut io::stdout().lock());
}

/// Print the run summary to a custom writer. Useful for testing.
pub fn print_summary_to<W: Write>(extraction: &Extraction, keys: &LocaleKeySet, writer: &mut W) {
    let total = keys.len();
    let used = extraction.usage.len();
    let unused = total - used;

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Scanned {} source {}",
            extraction.files_scanned,
            if extraction.files_scanned == 1 {
                "file"
            } else {
                "files"
            }
        )
        .green()
    );
    let _ = writeln!(writer, "  total keys:  {}", total);
    let _ = writeln!(writer, "  used keys:   {}", used);
    let _ = writeln!(writer, "  unused keys: {}", unused);
    let _ = writeln!(writer, "  usage rate:  {}", usage_rate(used, total));
}

/// Print a warning about files that fell back to pattern scanning.
pub fn print_fallback_warning(extraction: &Extraction, verbose: bool) {
    print_fallback_warning_to(extraction, verbose, &mut io::stderr().lock());
}

/// Print a fallback warning to a custom writer.
pub fn print_fallback_warning_to<W: Write>(extraction: &Extraction, verbose: bool, writer: &mut W) {
    let count = extraction.fallback_files.len();
    if count == 0 {
        return;
    }
    if verbose {
        for path in &extraction.fallback_files {
            let _ = writeln!(
                writer,
                "{} pattern-scanned (structural parse failed): {}",
                "warning:".bold().yellow(),
                path.display()
            );
        }
    } else {
        let _ = writeln!(
            writer,
            "{} {} file(s) fell back to pattern scanning (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

/// Best-effort JSON persistence: failures are reported, never fatal.
pub fn write_report(path: &Path, report: &UsageReport) {
    let json = match serde_json::to_string_pretty(report) {
        Ok(json) => json,
        Err(err) => {
            eprintln!(
                "{} Failed to serialize report: {}",
                "warning:".bold().yellow(),
                err
            );
            return;
        }
    };
    match fs::write(path, json) {
        Ok(()) => {
            println!(
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Report written to {}", path.display()).green()
            );
        }
        Err(err) => {
            eprintln!(
                "{} Failed to write report {}: {}",
                "warning:".bold().yellow(),
                path.display(),
                err
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::core::UsageMap;

    fn strip_ansi(s: &str) -> String {
        // Simple ANSI escape code stripper for testing
        let mut result = String::new();
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next == 'm' {
                        break;
                    }
                }
            } else {
                result.push(c);
            }
        }
        result
    }

    fn sample_usage(keys: &LocaleKeySet) -> UsageMap {
        let mut usage = UsageMap::new();
        usage.record(keys, "trade.high", Path::new("/p/a.vue"), "/:lang/trade/_id");
        usage.record(keys, "trade.high", Path::new("/p/b.vue"), "/:lang/spot");
        usage.record(keys, "common.ok", Path::new("/p/a.vue"), "/:lang/trade/_id");
        usage
    }

    fn sample_keys() -> LocaleKeySet {
        LocaleKeySet::from_value(&json!({
            "trade": {"high": "High"},
            "common": {"ok": "OK"},
            "unused": {"one": "1", "two": "2"}
        }))
    }

    #[test]
    fn test_usage_rate_formatting() {
        assert_eq!(usage_rate(4, 10), "40.00%");
        assert_eq!(usage_rate(1, 3), "33.33%");
        assert_eq!(usage_rate(0, 5), "0.00%");
        assert_eq!(usage_rate(0, 0), "0.00%");
    }

    #[test]
    fn test_display_route_strips_language_segment() {
        assert_eq!(display_route("/:lang/trade/detail"), "/trade/detail");
        assert_eq!(display_route("/_lang/spot"), "/spot");
    }

    #[test]
    fn test_display_route_without_language_segment_is_empty() {
        assert_eq!(display_route("/spot"), "");
    }

    #[test]
    fn test_display_route_substitutes_pair_suffixes() {
        assert_eq!(display_route("/:lang/trade/_id"), "/trade/BTC-USDT");
        assert_eq!(display_route("/:lang/spot/_coin"), "/spot/BTC-USDT");
        assert_eq!(display_route("/:lang/futures/_contract"), "/futures/BTC-USDT");
    }

    #[test]
    fn test_build_report_counts_and_schema() {
        let keys = sample_keys();
        let usage = sample_usage(&keys);
        let generated = Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 0).unwrap();

        let report = build_report(&usage, &keys, "client/lang/en.json", generated);

        // Key set: trade, trade.high, common, common.ok, unused, unused.one,
        // unused.two = 7 total; 2 used.
        assert_eq!(report.metadata.total_keys, 7);
        assert_eq!(report.metadata.used_keys, 2);
        assert_eq!(report.metadata.unused_keys, 5);
        assert_eq!(report.metadata.generated_at, "2025-06-01T12:30:00.000Z");
        assert_eq!(report.statistics.usage_rate, "28.57%");
        assert_eq!(report.summary.keys_with_multiple_routes, 1);
        assert_eq!(report.summary.keys_with_multiple_pages, 1);

        // Entries are key-sorted.
        let names: Vec<&str> = report.key_usage.iter().map(|k| k.key.as_str()).collect();
        assert_eq!(names, vec!["common.ok", "trade.high"]);

        let trade = &report.key_usage[1];
        assert_eq!(trade.routes, vec!["/spot", "/trade/BTC-USDT"]);
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let keys = sample_keys();
        let usage = sample_usage(&keys);
        let generated = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();

        let report = build_report(&usage, &keys, "en.json", generated);
        let value = serde_json::to_value(&report).unwrap();

        assert!(value["metadata"]["i18nFile"].is_string());
        assert!(value["metadata"]["generatedAt"].is_string());
        assert!(value["statistics"]["usageRate"].is_string());
        assert!(value["keyUsage"].is_array());
        assert!(value["summary"]["keysWithMultipleRoutes"].is_number());
        assert!(value["summary"]["keysWithMultiplePages"].is_number());
    }

    #[test]
    fn test_print_summary_output() {
        let keys = sample_keys();
        let extraction = Extraction {
            usage: sample_usage(&keys),
            files_scanned: 3,
            fallback_files: Vec::new(),
        };

        let mut output = Vec::new();
        print_summary_to(&extraction, &keys, &mut output);
        let text = strip_ansi(&String::from_utf8(output).unwrap());

        assert!(text.contains("Scanned 3 source files"));
        assert!(text.contains("total keys:  7"));
        assert!(text.contains("used keys:   2"));
        assert!(text.contains("unused keys: 5"));
        assert!(text.contains("usage rate:  28.57%"));
    }

    #[test]
    fn test_fallback_warning_counts() {
        let extraction = Extraction {
            usage: UsageMap::new(),
            files_scanned: 2,
            fallback_files: vec!["/p/a.vue".into(), "/p/b.vue".into()],
        };

        let mut output = Vec::new();
        print_fallback_warning_to(&extraction, false, &mut output);
        let text = strip_ansi(&String::from_utf8(output).unwrap());
        assert!(text.contains("2 file(s) fell back to pattern scanning"));

        let mut verbose_output = Vec::new();
        print_fallback_warning_to(&extraction, true, &mut verbose_output);
        let text = strip_ansi(&String::from_utf8(verbose_output).unwrap());
        assert!(text.contains("/p/a.vue"));
        assert!(text.contains("/p/b.vue"));
    }

    #[test]
    fn test_fallback_warning_silent_when_clean() {
        let extraction = Extraction::default();
        let mut output = Vec::new();
        print_fallback_warning_to(&extraction, false, &mut output);
        assert!(output.is_empty());
    }
}
