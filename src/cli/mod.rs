//! Command-line interface layer.

mod args;
mod exit_status;

pub use args::Arguments;
pub use exit_status::ExitStatus;

use anyhow::Result;
use chrono::Utc;

use crate::core::resolver;
use crate::core::{Extractor, LocaleKeySet};
use crate::report;

/// Run one extraction for the parsed arguments.
///
/// A missing or unparsable locale file is the one fatal condition; everything
/// downstream (missing pages directory, unreadable files, parse failures,
/// report write failures) degrades to warnings.
pub fn run_cli(args: Arguments) -> Result<()> {
    let locale_keys = LocaleKeySet::load(&args.i18n_file)?;
    let project_root = resolver::detect_project_root();

    let extractor = Extractor::new(locale_keys, project_root, args.verbose);
    let extraction = extractor.run();

    report::print_summary(&extraction, extractor.locale_keys());
    report::print_fallback_warning(&extraction, args.verbose);

    if let Some(output) = &args.output {
        let built = report::build_report(
            &extraction.usage,
            extractor.locale_keys(),
            &args.i18n_file.to_string_lossy(),
            Utc::now(),
        );
        report::write_report(output, &built);
    }

    Ok(())
}
