//! Pass 10: convert brace conditionals to keyword conditionals.

use crate::constants::{ELSE_HEADER_RE, IF_HEADER_RE};
use crate::error::TranslateError;
use crate::rewrite::{apply_edits, CodeEdit};
use crate::scanner::{matching_brace, matching_paren, next_word, StringSpans};

/// Rewrite `if (<cond>) {` headers (including the `if` of an
/// `else if (<cond>) {` continuation) to `if (<cond>) then`, bare
/// `else {` to `else`, and each conditional's closing `}` to `end if;` —
/// unless the token following the `}` is `else`, in which case the brace
/// is simply removed and the still-open chain is closed by a later branch.
pub fn convert_conditionals(text: &str) -> Result<String, TranslateError> {
    let strings = StringSpans::new(text);
    let mut edits = Vec::new();

    for header in IF_HEADER_RE().find_iter(text) {
        if strings.contains(header.start()) {
            continue;
        }
        let open_paren = header.end() - 1;
        let close_paren = matching_paren(text, open_paren, &strings)
            .ok_or(TranslateError::UnbalancedBlocks { offset: open_paren })?;
        // The header must be followed by an opening brace; anything else is
        // not a brace conditional.
        let Some(brace) = next_nonspace(text, close_paren + 1).filter(|&i| text[i..].starts_with('{'))
        else {
            continue;
        };
        let body_end = matching_brace(text, brace, &strings)
            .ok_or(TranslateError::UnbalancedBlocks { offset: brace })?;
        let condition = &text[open_paren..=close_paren];
        edits.push(CodeEdit::new(
            header.start(),
            brace + 1,
            format!("if {condition} then\n"),
        ));
        if next_word(text, body_end + 1, &strings) == Some("else") {
            edits.push(CodeEdit::new(body_end, body_end + 1, ""));
        } else {
            edits.push(CodeEdit::new(body_end, body_end + 1, "\nend if;\n"));
        }
    }

    for header in ELSE_HEADER_RE().find_iter(text) {
        if strings.contains(header.start()) {
            continue;
        }
        let brace = header.end() - 1;
        let body_end = matching_brace(text, brace, &strings)
            .ok_or(TranslateError::UnbalancedBlocks { offset: brace })?;
        edits.push(CodeEdit::new(header.start(), header.end(), "else\n"));
        edits.push(CodeEdit::new(body_end, body_end + 1, "\nend if;\n"));
    }

    Ok(apply_edits(text, edits)?)
}

fn next_nonspace(text: &str, from: usize) -> Option<usize> {
    text[from..]
        .char_indices()
        .find(|(_, ch)| !ch.is_whitespace())
        .map(|(rel, _)| from + rel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_eq_ignoring_whitespace;

    #[test]
    fn single_if_gains_then_and_end() {
        let text = "if (x > 0) {\ny = 1;\n}";
        let result = convert_conditionals(text).unwrap();
        assert_eq_ignoring_whitespace("if (x > 0) then\ny = 1;\nend if;", &result);
    }

    #[test]
    fn chain_closes_exactly_once() {
        let text = "if (a) {\nx = 1;\n} else if (b) {\nx = 2;\n} else {\nx = 3;\n}";
        let result = convert_conditionals(text).unwrap();
        assert_eq!(result.matches("end if;").count(), 1);
        assert!(result.contains("if (a) then"));
        assert!(result.contains("else if (b) then"));
        let else_pos = result.rfind("else\n").unwrap();
        let end_pos = result.rfind("end if;").unwrap();
        assert!(else_pos < end_pos);
    }

    #[test]
    fn if_else_without_chain() {
        let text = "if (a) {\nx = 1;\n} else {\nx = 2;\n}";
        let result = convert_conditionals(text).unwrap();
        assert_eq!(result.matches("end if;").count(), 1);
        assert!(result.contains("if (a) then"));
    }

    #[test]
    fn nested_conditionals_each_close() {
        let text = "if (a) {\nif (b) {\nx = 1;\n}\n}";
        let result = convert_conditionals(text).unwrap();
        assert_eq!(result.matches("end if;").count(), 2);
    }

    #[test]
    fn nested_condition_parentheses_survive() {
        let text = "if (f(x) > g(y)) {\nz = 1;\n}";
        let result = convert_conditionals(text).unwrap();
        assert!(result.contains("if (f(x) > g(y)) then"));
    }

    #[test]
    fn if_text_inside_string_is_untouched() {
        let text = "msg = \"if (x) {\";";
        assert_eq!(convert_conditionals(text).unwrap(), text);
    }
}
