//! Extraction engine.
//!
//! One extraction run flows through these modules in order: `locale` loads
//! and flattens the dictionary, `walker` enumerates page files, `scanner`
//! pulls raw `$t` keys and import specifiers out of each file, `resolver`
//! turns specifiers into files to recurse into, `route` derives a route
//! string per entry page, and `usage` accumulates the result.

pub mod extractor;
pub mod locale;
pub mod resolver;
pub mod route;
pub mod scanner;
pub mod usage;
pub mod walker;

pub use extractor::{Extraction, Extractor};
pub use locale::LocaleKeySet;
pub use resolver::ImportResolver;
pub use usage::{ScannedFileSet, UsageEntry, UsageMap};
