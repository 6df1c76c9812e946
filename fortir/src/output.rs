//! Diagnostics output for the batch CLI: colored per-file lines and the
//! machine-readable JSON report.

use colored::Colorize;
use serde::Serialize;
use std::io::Write;

/// Outcome of transpiling one input file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// The input path as given on the command line.
    pub file: String,
    /// Path the transformed text was written to, when writing to disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Transformed text, carried only in stdout mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Failure message, when the transformation or I/O failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    /// Whether this file transpiled (and persisted) cleanly.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Print a per-file success line.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_success(writer: &mut impl Write, report: &FileReport) -> std::io::Result<()> {
    let destination = report.output.as_deref().unwrap_or("<stdout>");
    writeln!(
        writer,
        "{} {} -> {}",
        "[OK]".green(),
        report.file,
        destination
    )
}

/// Print a per-file failure line.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_failure(writer: &mut impl Write, report: &FileReport) -> std::io::Result<()> {
    let message = report.error.as_deref().unwrap_or("unknown error");
    writeln!(
        writer,
        "{} {}: {}",
        "[FAIL]".red().bold(),
        report.file,
        message
    )
}

/// Print the batch summary line.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_summary(writer: &mut impl Write, total: usize, failed: usize) -> std::io::Result<()> {
    if failed == 0 {
        writeln!(
            writer,
            "{} {total} file(s) transpiled",
            "[DONE]".green().bold()
        )
    } else {
        writeln!(
            writer,
            "{} {failed} of {total} file(s) failed",
            "[DONE]".yellow().bold()
        )
    }
}

/// Write the whole batch report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json_report(
    writer: &mut impl Write,
    reports: &[FileReport],
) -> anyhow::Result<()> {
    writeln!(writer, "{}", serde_json::to_string_pretty(reports)?)?;
    Ok(())
}
