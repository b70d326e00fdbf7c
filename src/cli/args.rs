//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Locale JSON file to audit (e.g. client/lang/en.json)
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub i18n_file: PathBuf,

    /// Write a JSON usage report to this path
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_locale_file() {
        let result = Arguments::try_parse_from(["routekey"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parses_locale_file_only() {
        let args = Arguments::try_parse_from(["routekey", "-f", "lang/en.json"]).unwrap();
        assert_eq!(args.i18n_file, PathBuf::from("lang/en.json"));
        assert!(args.output.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_parses_output_and_verbose() {
        let args = Arguments::try_parse_from([
            "routekey",
            "--file",
            "en.json",
            "--output",
            "report.json",
            "--verbose",
        ])
        .unwrap();
        assert_eq!(args.output, Some(PathBuf::from("report.json")));
        assert!(args.verbose);
    }
}
