//! Pass 7: insert the no-implicit-typing marker.

use crate::blocks::find_declaring_blocks;
use crate::error::TranslateError;
use crate::rewrite::{apply_edits, CodeEdit};
use crate::scanner::StringSpans;

/// Insert `implicit none;` as the first body line of every declaring block
/// (function/subroutine/program).
pub fn add_implicit_none(text: &str) -> Result<String, TranslateError> {
    let strings = StringSpans::new(text);
    let edits = find_declaring_blocks(text, &strings)?
        .iter()
        .map(|block| CodeEdit::insert(block.body_start, "\nimplicit none;\n"))
        .collect();
    Ok(apply_edits(text, edits)?)
}
