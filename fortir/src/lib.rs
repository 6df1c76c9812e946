//! Core library for the `fortir` source-to-source transpiler.
//!
//! Rewrites a curly-brace, C-like dialect into a classic block-delimited
//! legacy procedural language through an ordered sequence of whole-text
//! passes. The pipeline consumes plain text and produces plain text; all
//! file handling lives in the CLI layer.

#![allow(clippy::items_after_statements)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module containing block/function discovery.
/// Blocks are re-derived from the current text by every pass that needs them.
pub mod blocks;

/// Module defining the command-line interface arguments.
pub mod cli;

/// Module for loading configuration.
pub mod config;

/// Module containing shared keyword sets and cached regex patterns.
pub mod constants;

/// Module defining the entry point logic shared by every invocation path.
pub mod entry_point;

/// Module defining the transformation error values.
pub mod error;

/// Module for CLI output formatting (colored diagnostics, JSON report).
pub mod output;

/// Module containing the transformation passes, one per stage.
pub mod passes;

/// Module containing the pipeline driver and its fixed stage order.
pub mod pipeline;

/// Module containing the positional edit list and batch applier.
pub mod rewrite;

/// Module containing the raw-text scanning primitives.
pub mod scanner;

/// Module containing symbol declaration lookup.
pub mod symbols;

/// Module containing test utilities.
pub mod test_utils;

pub use error::TranslateError;
pub use pipeline::transpile;
