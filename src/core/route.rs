//! Route derivation from page file locations.
//!
//! A best-effort textual transform over Nuxt2's file-based routing
//! convention. Routes are never validated against an actual route table.

use std::path::Path;

/// Derive a route string for a page file.
///
/// `route_prefix` is the walker's accumulated directory path relative to the
/// pages root (empty at the root). The file stem is appended, a trailing
/// `index` segment collapses to the parent path, and the first
/// underscore-prefixed segment becomes a `:param` marker. The result always
/// carries a single leading `/`.
pub fn derive_route(route_prefix: &str, file_path: &Path) -> String {
    let stem = file_path.file_stem().and_then(|s| s.to_str()).unwrap_or("");

    let mut route = if stem == "index" {
        route_prefix.to_string()
    } else if route_prefix.is_empty() {
        stem.to_string()
    } else {
        format!("{}/{}", route_prefix, stem)
    };

    route = route.replace('\\', "/");
    if !route.starts_with('/') {
        route.insert(0, '/');
    }

    // Only the first dynamic segment becomes a parameter marker.
    route.replacen("/_", "/:", 1)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_plain_page() {
        assert_eq!(derive_route("", Path::new("about.vue")), "/about");
    }

    #[test]
    fn test_nested_page() {
        assert_eq!(
            derive_route("spot/detail", Path::new("chart.vue")),
            "/spot/detail/chart"
        );
    }

    #[test]
    fn test_index_collapses_to_parent() {
        assert_eq!(derive_route("spot", Path::new("index.vue")), "/spot");
    }

    #[test]
    fn test_root_index_is_root_route() {
        assert_eq!(derive_route("", Path::new("index.vue")), "/");
    }

    #[test]
    fn test_underscore_segment_becomes_parameter() {
        assert_eq!(derive_route("coin", Path::new("_id.vue")), "/coin/:id");
    }

    #[test]
    fn test_leading_underscore_directory_becomes_parameter() {
        assert_eq!(
            derive_route("_lang/trade", Path::new("detail.vue")),
            "/:lang/trade/detail"
        );
    }

    #[test]
    fn test_only_first_underscore_segment_rewritten() {
        assert_eq!(
            derive_route("_lang/trade", Path::new("_id.vue")),
            "/:lang/trade/_id"
        );
    }

    #[test]
    fn test_extension_is_stripped() {
        assert_eq!(derive_route("help", Path::new("faq.ts")), "/help/faq");
        assert_eq!(derive_route("help", Path::new("faq.js")), "/help/faq");
    }
}
