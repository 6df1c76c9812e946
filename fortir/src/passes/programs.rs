//! Pass 9: name unnamed program blocks.

use crate::constants::{DEFAULT_PROGRAM_NAME, UNNAMED_PROGRAM_RE};
use crate::error::TranslateError;
use crate::rewrite::{apply_edits, CodeEdit};
use crate::scanner::StringSpans;

/// Rewrite a `program` header with no name token before its opening
/// delimiter to carry the fixed default name.
pub fn name_unnamed_programs(text: &str) -> Result<String, TranslateError> {
    let strings = StringSpans::new(text);
    let mut edits = Vec::new();
    for captures in UNNAMED_PROGRAM_RE().captures_iter(text) {
        #[allow(clippy::unwrap_used)]
        let header = captures.get(1).unwrap();
        if strings.contains(header.start()) {
            continue;
        }
        edits.push(CodeEdit::new(
            header.start(),
            header.end(),
            format!("program {DEFAULT_PROGRAM_NAME} {{"),
        ));
    }
    Ok(apply_edits(text, edits)?)
}
