//! Pass 1: strip line comments.

use crate::constants::COMMENT_MARKER;
use crate::error::TranslateError;
use crate::scanner::is_inside_string;

/// Truncate every line at its first `!` marker that is not inside a string
/// literal. Runs first, so every subsequent pass sees comment-free text.
pub fn strip_comments(text: &str) -> Result<String, TranslateError> {
    let stripped: Vec<&str> = text.split('\n').map(truncate_at_marker).collect();
    Ok(stripped.join("\n"))
}

fn truncate_at_marker(line: &str) -> &str {
    for (idx, _) in line.match_indices(COMMENT_MARKER) {
        if !is_inside_string(line, idx) {
            return &line[..idx];
        }
    }
    line
}
