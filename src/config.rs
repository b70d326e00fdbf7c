//! Fixed project-layout constants.
//!
//! Routekey targets one project shape: a Nuxt2 app whose front-end code lives
//! under `client/`, with pages in `client/pages`. The values here describe
//! that layout and the import-alias conventions the codebase uses.

/// Pages directory, relative to the detected project root.
pub const PAGES_DIR: &str = "client/pages";

/// Directory the `~/`, `@/` and `@` aliases point into, relative to root.
pub const CLIENT_DIR: &str = "client";

/// Directory the `@/` alias prefers before falling back to `client/`.
pub const SRC_DIR: &str = "src";

/// Files whose presence marks a directory as the project root.
pub const PROJECT_MARKERS: &[&str] = &["nuxt.config.js", "nuxt.config.ts", "package.json"];

/// Extensions of files the scanner understands.
pub const SCANNABLE_EXTENSIONS: &[&str] = &["vue", "js", "ts"];

/// Candidate suffixes probed when resolving an import specifier, in order.
pub const RESOLVE_SUFFIXES: &[&str] = &[".js", ".vue", "/index.vue", "/index.js"];
