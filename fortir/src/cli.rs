//! Command-line interface argument definitions.

use clap::{Args, Parser};
use std::path::PathBuf;

/// Help text for the configuration file, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.fortir.toml):
  Create this file in your project root to set defaults.

  [fortir]
  output_dir = \"out\"    # Where transformed files are written
  extension = \"f90\"     # Extension given to transformed files
  sequential = false     # Process files one at a time

  Command-line flags override configuration values.
";

/// Transpile curly-brace dialect sources into block-delimited legacy code.
#[derive(Parser, Debug)]
#[command(name = "fortir", version, after_help = CONFIG_HELP)]
pub struct Cli {
    /// Source files to transpile.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Directory where transformed files are written.
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// File extension given to transformed files.
    #[arg(short = 'e', long)]
    pub extension: Option<String>,

    /// Print transformed text to stdout instead of writing files.
    #[arg(long)]
    pub stdout: bool,

    /// Process files one at a time instead of in parallel.
    #[arg(long)]
    pub sequential: bool,

    /// Output formatting options.
    #[command(flatten)]
    pub output: OutputOptions,
}

/// Options for output formatting and verbosity.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputOptions {
    /// Output the batch report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Echo each successfully transformed file.
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode: report failures only, no summary.
    #[arg(long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_files_and_flags() {
        let cli = Cli::try_parse_from(["fortir", "a.src", "b.src", "-o", "build", "--json"])
            .unwrap();
        assert_eq!(cli.files.len(), 2);
        assert_eq!(cli.output_dir, Some(PathBuf::from("build")));
        assert!(cli.output.json);
        assert!(!cli.sequential);
    }

    #[test]
    fn at_least_one_file_is_required() {
        assert!(Cli::try_parse_from(["fortir"]).is_err());
    }
}
