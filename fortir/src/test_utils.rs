//! Test utilities.
//!
//! The transformed output's exact layout is whitespace-noisy by design
//! (edits splice newlines freely and only the final pass normalizes), so
//! tests compare token streams instead of raw text.

/// The whitespace-separated tokens of a text.
#[must_use]
pub fn whitespace_tokens(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Assert two texts are equal ignoring all whitespace layout.
///
/// # Panics
///
/// Panics when the token streams differ.
pub fn assert_eq_ignoring_whitespace(expected: &str, actual: &str) {
    assert_eq!(
        whitespace_tokens(expected),
        whitespace_tokens(actual),
        "texts differ ignoring whitespace\nexpected:\n{expected}\nactual:\n{actual}"
    );
}
