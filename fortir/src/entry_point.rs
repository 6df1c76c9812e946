//! Shared CLI entry point: argument handling, batch orchestration, and
//! exit-code policy.
//!
//! The core pipeline touches no files; everything filesystem-shaped lives
//! here. A failed file never aborts the batch — it is reported and counted
//! into the exit code.

use crate::cli::Cli;
use crate::config::Config;
use crate::output::{self, FileReport};
use crate::pipeline;
use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Run the transpiler with the given command-line arguments (program name
/// excluded) and return the process exit code.
///
/// # Errors
/// Returns an error only for I/O failures while reporting; per-file
/// problems are carried in the exit code instead.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    let mut argv = vec!["fortir".to_owned()];
    argv.extend(args);
    let cli = match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{err}");
                return Ok(0);
            }
            _ => {
                eprint!("{err}");
                return Ok(2);
            }
        },
    };

    // Load config from the first input's location, falling back to the
    // current directory.
    let config_path = cli
        .files
        .first()
        .map_or_else(|| Path::new(".").to_path_buf(), Clone::clone);
    let config = Config::load_from_path(&config_path);
    let output_dir = cli
        .output_dir
        .clone()
        .or_else(|| config.fortir.output_dir.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("out"));
    let extension = cli
        .extension
        .clone()
        .or_else(|| config.fortir.extension.clone())
        .unwrap_or_else(|| "f90".to_owned());
    let sequential = cli.sequential || config.fortir.sequential.unwrap_or(false);

    let destination = if cli.stdout {
        None
    } else {
        fs::create_dir_all(&output_dir)
            .with_context(|| format!("cannot create output directory {}", output_dir.display()))?;
        Some((output_dir.as_path(), extension.as_str()))
    };

    // Each file's transformation is independent of every other file's, so
    // the batch is embarrassingly parallel.
    let reports: Vec<FileReport> = if sequential {
        cli.files
            .iter()
            .map(|path| process_file(path, destination))
            .collect()
    } else {
        cli.files
            .par_iter()
            .map(|path| process_file(path, destination))
            .collect()
    };

    report(&cli, &reports)?;
    let failed = reports.iter().filter(|r| !r.succeeded()).count();
    Ok(i32::from(failed > 0))
}

fn process_file(path: &Path, destination: Option<(&Path, &str)>) -> FileReport {
    let file = path.display().to_string();
    let transformed = fs::read_to_string(path)
        .map_err(|err| format!("cannot read {file}: {err}"))
        .and_then(|source| {
            pipeline::transpile(&source).map_err(|err| err.to_string())
        });
    match transformed {
        Ok(text) => match destination {
            Some((dir, extension)) => {
                let stem = path.file_stem().unwrap_or_default();
                let out_path = dir.join(stem).with_extension(extension);
                match fs::write(&out_path, &text) {
                    Ok(()) => FileReport {
                        file,
                        output: Some(out_path.display().to_string()),
                        text: None,
                        error: None,
                    },
                    Err(err) => FileReport {
                        file,
                        output: None,
                        text: None,
                        error: Some(format!("cannot write {}: {err}", out_path.display())),
                    },
                }
            }
            None => FileReport {
                file,
                output: None,
                text: Some(text),
                error: None,
            },
        },
        Err(error) => FileReport {
            file,
            output: None,
            text: None,
            error: Some(error),
        },
    }
}

fn report(cli: &Cli, reports: &[FileReport]) -> Result<()> {
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();

    if cli.output.json {
        output::write_json_report(&mut stdout, reports)?;
        return Ok(());
    }

    for file_report in reports {
        if file_report.succeeded() {
            if let Some(text) = &file_report.text {
                write!(stdout, "{text}")?;
                if !text.ends_with('\n') {
                    writeln!(stdout)?;
                }
            } else if cli.output.verbose {
                output::print_success(&mut stdout, file_report)?;
            }
        } else {
            output::print_failure(&mut stderr, file_report)?;
        }
    }
    if !cli.output.quiet {
        let failed = reports.iter().filter(|r| !r.succeeded()).count();
        output::print_summary(&mut stderr, reports.len(), failed)?;
    }
    Ok(())
}
