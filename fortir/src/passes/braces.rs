//! Pass 13 (final): remove curly brackets and emit `end <keyword>`
//! markers.

use crate::constants::BRACE_BLOCK_KEYWORDS;
use crate::error::TranslateError;
use crate::rewrite::{apply_edits, collapse_whitespace, CodeEdit};
use crate::scanner::{nearest_preceding_keyword, StringSpans};

/// Scan every brace delimiter outside string literals with a stack of
/// pending block keywords: an opening brace pushes its governing keyword
/// (nearest preceding occurrence) and becomes a newline; a closing brace
/// pops and becomes `end <keyword>;`. Ends with whitespace normalization
/// to produce the final emitted text.
///
/// # Errors
/// Returns [`TranslateError::UnbalancedBlocks`] for a close with no open,
/// an open with no governing keyword, or blocks left open at end of text.
pub fn remove_braces(text: &str) -> Result<String, TranslateError> {
    let strings = StringSpans::new(text);
    let mut stack: Vec<&str> = Vec::new();
    let mut edits = Vec::new();

    for (offset, ch) in text.char_indices() {
        if (ch != '{' && ch != '}') || strings.contains(offset) {
            continue;
        }
        if ch == '{' {
            let keyword = nearest_preceding_keyword(text, offset, BRACE_BLOCK_KEYWORDS, &strings)
                .ok_or(TranslateError::UnbalancedBlocks { offset })?;
            stack.push(keyword);
            edits.push(CodeEdit::new(offset, offset + 1, "\n"));
        } else {
            let keyword = stack
                .pop()
                .ok_or(TranslateError::UnbalancedBlocks { offset })?;
            edits.push(CodeEdit::new(
                offset,
                offset + 1,
                format!("\nend {keyword};\n"),
            ));
        }
    }
    if !stack.is_empty() {
        return Err(TranslateError::UnbalancedBlocks { offset: text.len() });
    }

    Ok(collapse_whitespace(&apply_edits(text, edits)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_eq_ignoring_whitespace;

    #[test]
    fn nested_blocks_close_innermost_first() {
        let text = "function foo() {\ndo i=1,10 {\nx\n}\n}";
        let result = remove_braces(text).unwrap();
        assert_eq_ignoring_whitespace(
            "function foo()\ndo i=1,10\nx\nend do;\nend function;",
            &result,
        );
    }

    #[test]
    fn open_count_matches_end_marker_count() {
        let text = "program p {\ndo i=1,2 {\nx = i;\n}\nsubroutine_like = 0;\n}";
        let opens = text.matches('{').count();
        let result = remove_braces(text).unwrap();
        assert_eq!(result.matches("end ").count(), opens);
    }

    #[test]
    fn brace_inside_string_survives() {
        let text = "program p {\nmsg = \"{\";\n}";
        let result = remove_braces(text).unwrap();
        assert!(result.contains("\"{\""));
        assert_eq!(result.matches("end program;").count(), 1);
    }

    #[test]
    fn unmatched_close_is_an_error() {
        let text = "program p {\n}\n}";
        assert!(matches!(
            remove_braces(text),
            Err(TranslateError::UnbalancedBlocks { .. })
        ));
    }

    #[test]
    fn unclosed_block_is_an_error() {
        let text = "program p {\nx = 1;";
        assert!(matches!(
            remove_braces(text),
            Err(TranslateError::UnbalancedBlocks { .. })
        ));
    }

    #[test]
    fn blank_runs_are_collapsed() {
        let text = "do  i {\n\n\nx\n}";
        let result = remove_braces(text).unwrap();
        assert!(!result.contains("  "));
        assert!(!result.contains("\n\n"));
        assert_eq_ignoring_whitespace("do i\nx\nend do;", &result);
    }
}
