//! Main binary entry point for the `fortir` transpiler.
//!
//! This binary simply delegates to the shared `entry_point::run_with_args()`
//! function so the CLI behaves identically however it is invoked.

use anyhow::Result;

fn main() -> Result<()> {
    let code = fortir::entry_point::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}
