//! Pass 12: inline pointer-cast calls as type-guarded rebinds.

use crate::constants::CAST_RE;
use crate::error::TranslateError;
use crate::rewrite::{apply_edits, CodeEdit};
use crate::scanner::StringSpans;
use crate::symbols::find_symbol_declaration;

/// Replace `<dest> = cast(<src>)` with a type-discriminating pointer
/// rebind: a temporary alias is bound to the source, guarded on the
/// alias's concrete type matching the destination's declared type, and the
/// destination is rebound inside the guard.
///
/// The destination's nearest preceding declaration decides: object or
/// pointer typed destinations are rewritten; anything else leaves the call
/// unchanged.
///
/// # Errors
/// Returns [`TranslateError::UnresolvedSymbol`] when the destination has
/// no preceding declaration, and
/// [`TranslateError::InvalidTypeDeclaration`] when its declared type text
/// cannot be parsed into a concrete type name.
pub fn inline_pointer_casts(text: &str) -> Result<String, TranslateError> {
    let strings = StringSpans::new(text);
    let mut edits = Vec::new();
    for captures in CAST_RE().captures_iter(text) {
        #[allow(clippy::unwrap_used)]
        let whole = captures.get(0).unwrap();
        if strings.contains(whole.start()) {
            continue;
        }
        let destination = &captures[1];
        let source = &captures[2];
        let declaration = find_symbol_declaration(text, destination, whole.start(), &strings)?;
        if !declaration.is_object() {
            continue;
        }
        let concrete_type = declaration.declared_type()?;
        edits.push(CodeEdit::new(
            whole.start(),
            whole.end(),
            format!(
                "select type(a => {source})\nclass is ({concrete_type})\n{destination} => a\nend select"
            ),
        ));
    }
    Ok(apply_edits(text, edits)?)
}
