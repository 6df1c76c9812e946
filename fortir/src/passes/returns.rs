//! Pass 5: translate `return <expr>;` into the target convention.

use crate::blocks::find_function_blocks;
use crate::constants::RETURN_RE;
use crate::error::TranslateError;
use crate::rewrite::{apply_edits, CodeEdit};
use crate::scanner::StringSpans;

/// Inside each function block, rewrite `return <expr>;` as an assignment
/// to the function's own name followed by a bare `return;` — the target
/// language returns values through the function-name variable.
pub fn translate_returns(text: &str) -> Result<String, TranslateError> {
    let strings = StringSpans::new(text);
    let functions = find_function_blocks(text, "function", &strings)?;
    let mut edits = Vec::new();

    for function in &functions {
        let body = &text[function.block.body_start..function.block.body_end];
        if !body.contains("return") {
            continue;
        }
        for captures in RETURN_RE().captures_iter(body) {
            #[allow(clippy::unwrap_used)]
            let whole = captures.get(0).unwrap();
            let abs_start = function.block.body_start + whole.start();
            if strings.contains(abs_start) {
                continue;
            }
            // A return inside a nested function belongs to that function.
            if functions.iter().any(|nested| {
                function.block.encloses(&nested.block) && nested.block.body_contains(abs_start)
            }) {
                continue;
            }
            let value = captures[1].trim();
            edits.push(CodeEdit::new(
                abs_start,
                abs_start + whole.len(),
                format!("{} = {};\nreturn;", function.name, value),
            ));
        }
    }

    Ok(apply_edits(text, edits)?)
}
