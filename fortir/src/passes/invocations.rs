//! Pass 4: declare the return types of invoked functions.

use crate::blocks::{find_declaring_blocks, is_innermost_owner};
use crate::constants::{CALL_RE, NON_CALL_PREFIXES, RESERVED_CALL_NAMES};
use crate::error::TranslateError;
use crate::rewrite::{apply_edits, CodeEdit};
use crate::scanner::{preceding_word, StringSpans};
use regex::Regex;
use rustc_hash::FxHashSet;

/// For every call expression `<name>(...)` inside a declaring block, find
/// the invoked function's declaration elsewhere in the text and insert
/// `<type>::<name>;` at the top of the block. Construction (`new`),
/// subroutine invocation (`call`), headers, and reserved names are not
/// value-returning calls and are skipped.
///
/// # Errors
/// Returns [`TranslateError::UnresolvedFunction`] when an invoked name has
/// no `<type> function <name>(` declaration anywhere in the text.
pub fn declare_invoked_return_types(text: &str) -> Result<String, TranslateError> {
    let strings = StringSpans::new(text);
    let blocks = find_declaring_blocks(text, &strings)?;
    let mut edits = Vec::new();

    for block in &blocks {
        let body = &text[block.body_start..block.body_end];
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut declarations: Vec<String> = Vec::new();

        for captures in CALL_RE().captures_iter(body) {
            #[allow(clippy::unwrap_used)]
            let name_match = captures.get(1).unwrap();
            let name = name_match.as_str();
            let abs_start = block.body_start + name_match.start();
            if strings.contains(abs_start)
                || !is_innermost_owner(&blocks, block, abs_start)
                || RESERVED_CALL_NAMES().contains(name)
            {
                continue;
            }
            if preceding_word(text, abs_start, &strings)
                .is_some_and(|word| NON_CALL_PREFIXES().contains(word))
            {
                continue;
            }
            if !seen.insert(name) {
                continue;
            }
            let declared_type = lookup_function_type(text, name, &strings)
                .ok_or_else(|| TranslateError::UnresolvedFunction(name.to_owned()))?;
            declarations.push(format!("{declared_type}::{name};"));
        }

        if !declarations.is_empty() {
            edits.push(CodeEdit::insert(
                block.body_start,
                format!("\n{}\n", declarations.join("\n")),
            ));
        }
    }

    Ok(apply_edits(text, edits)?)
}

/// The declared return type of `name`, read from its
/// `<type> function <name>(` header anywhere in the text.
fn lookup_function_type(text: &str, name: &str, strings: &StringSpans) -> Option<String> {
    #[allow(clippy::expect_used)]
    let pattern = Regex::new(&format!(
        r"([\w$]+(?:\([^)\n]*\))?)[ \t]+function[ \t]+{}[ \t]*\(",
        regex::escape(name)
    ))
    .expect("Invalid function declaration regex pattern");
    let result = pattern
        .captures_iter(text)
        .find(|captures| {
            #[allow(clippy::unwrap_used)]
            let m = captures.get(0).unwrap();
            !strings.contains(m.start())
        })
        .map(|captures| captures[1].to_owned());
    result
}
