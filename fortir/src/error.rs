//! Error values produced by the transformation pipeline.
//!
//! Every pass reports failure through [`TranslateError`] rather than
//! panicking; the pipeline driver propagates the first failure and the
//! whole-file transformation aborts with no partial output.

use crate::rewrite::RewriteError;

/// A failure encountered while transforming one source file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    /// A call site references a function name with no discoverable
    /// `<type> function <name>(` declaration anywhere in the text.
    #[error("function `{0}` is never declared")]
    UnresolvedFunction(String),

    /// A pointer-cast destination has no preceding declaration statement.
    #[error("cannot find a declaration for symbol `{0}`")]
    UnresolvedSymbol(String),

    /// A symbol's declaration line could not be parsed into a concrete
    /// type name (e.g. a malformed `type(...)` wrapper).
    #[error("cannot determine the declared type of `{symbol}` from `{line}`")]
    InvalidTypeDeclaration {
        /// The symbol whose declaration was being resolved.
        symbol: String,
        /// The declaration line that failed to parse.
        line: String,
    },

    /// A block delimiter has no match, no governing keyword, or closes a
    /// block that was never opened.
    #[error("unbalanced block delimiter near byte offset {offset}")]
    UnbalancedBlocks {
        /// Byte offset of the offending delimiter (or end of text when a
        /// block is left open).
        offset: usize,
    },

    /// An edit batch violated the non-overlap contract. Passes construct
    /// non-overlapping edits, so this surfacing indicates a pass bug; it
    /// still propagates as an error rather than a panic.
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
}
