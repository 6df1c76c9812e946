//! Pass 11: translate object-reference declarations to typed pointers.

use crate::constants::OBJECT_DECL_RE;
use crate::error::TranslateError;
use crate::rewrite::{apply_edits, CodeEdit};
use crate::scanner::StringSpans;

/// Rewrite `<Type>, object :: <names>` as `type(<Type>),pointer::<names>`,
/// mapping the dialect's reference-semantics object declaration onto the
/// target language's typed-pointer declaration syntax. A trailing comma in
/// the name list is stripped.
pub fn translate_object_declarations(text: &str) -> Result<String, TranslateError> {
    let strings = StringSpans::new(text);
    let mut edits = Vec::new();
    for captures in OBJECT_DECL_RE().captures_iter(text) {
        #[allow(clippy::unwrap_used)]
        let whole = captures.get(0).unwrap();
        if strings.contains(whole.start()) {
            continue;
        }
        let type_name = &captures[1];
        let names = captures[2].trim().trim_end_matches(',');
        edits.push(CodeEdit::new(
            whole.start(),
            whole.end(),
            format!("type({type_name}),pointer::{names}"),
        ));
    }
    Ok(apply_edits(text, edits)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_declaration_becomes_typed_pointer() {
        let text = "myType, object :: inst;";
        let result = translate_object_declarations(text).unwrap();
        assert_eq!(result, "type(myType),pointer::inst;");
    }

    #[test]
    fn trailing_comma_is_stripped() {
        let text = "node, object :: head,";
        let result = translate_object_declarations(text).unwrap();
        assert_eq!(result, "type(node),pointer::head");
    }

    #[test]
    fn multiple_names_are_preserved() {
        let text = "node, object :: head, tail;";
        let result = translate_object_declarations(text).unwrap();
        assert_eq!(result, "type(node),pointer::head, tail;");
    }

    #[test]
    fn plain_declarations_are_untouched() {
        let text = "integer::count;";
        assert_eq!(translate_object_declarations(text).unwrap(), text);
    }

    #[test]
    fn declaration_text_inside_string_is_untouched() {
        let text = "say(\"myType, object :: inst\");";
        assert_eq!(translate_object_declarations(text).unwrap(), text);
    }
}
