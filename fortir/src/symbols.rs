//! Symbol lookup: nearest preceding type declarations and their derived
//! queries.

use crate::error::TranslateError;
use crate::scanner::{is_word_char, StringSpans};
use regex::Regex;

/// One parsed parameter or hoisted variable binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDeclaration {
    /// Declared type text, attributes included (e.g. `character(len=3)`).
    pub declared_type: String,
    /// Bound identifier.
    pub identifier: String,
}

/// The nearest preceding declaration statement for a symbol, with lazy
/// queries over its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolDeclaration {
    /// The symbol the declaration was resolved for.
    pub symbol_name: String,
    /// Declaration text, from the start of the type head to end of line.
    pub line: String,
}

impl SymbolDeclaration {
    /// Whether this is a polymorphic/object-typed declaration: the
    /// attribute list before `::` carries `object` (source form) or
    /// `pointer` (the form object declarations take after translation).
    #[must_use]
    pub fn is_object(&self) -> bool {
        self.line
            .split("::")
            .next()
            .unwrap_or_default()
            .split(',')
            .any(|segment| matches!(segment.trim(), "object" | "pointer"))
    }

    /// The declared concrete type name.
    ///
    /// A `type(<Name>)` wrapper yields `<Name>`; a bare leading type word
    /// yields itself; any other `type...` head is rejected.
    ///
    /// # Errors
    /// Returns [`TranslateError::InvalidTypeDeclaration`] when no concrete
    /// type name can be parsed.
    pub fn declared_type(&self) -> Result<String, TranslateError> {
        let head = self
            .line
            .split("::")
            .next()
            .unwrap_or_default()
            .split(',')
            .next()
            .unwrap_or_default()
            .trim();
        let leading_word: String = head.chars().take_while(|&c| is_word_char(c)).collect();
        if leading_word == "type" {
            let inner = head
                .strip_prefix("type(")
                .and_then(|rest| rest.strip_suffix(')'))
                .map(str::trim)
                .filter(|inner| !inner.is_empty() && inner.chars().all(is_word_char));
            return inner.map(str::to_owned).ok_or_else(|| self.invalid());
        }
        if leading_word.is_empty() {
            return Err(self.invalid());
        }
        Ok(leading_word)
    }

    fn invalid(&self) -> TranslateError {
        TranslateError::InvalidTypeDeclaration {
            symbol: self.symbol_name.clone(),
            line: self.line.clone(),
        }
    }
}

/// Find the nearest declaration of `symbol_name` preceding
/// `usage_offset`: the last line-local `... :: <names>` statement whose
/// name list contains the symbol, skipping matches inside string literals.
///
/// # Errors
/// Returns [`TranslateError::UnresolvedSymbol`] when no preceding
/// declaration exists.
pub fn find_symbol_declaration(
    text: &str,
    symbol_name: &str,
    usage_offset: usize,
    strings: &StringSpans,
) -> Result<SymbolDeclaration, TranslateError> {
    #[allow(clippy::expect_used)]
    let pattern = Regex::new(&format!(
        r"[^:;\n]*::[ \t]*(?:[\w$]+[ \t]*,[ \t]*)*{}",
        regex::escape(symbol_name)
    ))
    .expect("Invalid symbol declaration regex pattern");

    let prefix = &text[..usage_offset];
    let mut line_end = prefix.len();
    loop {
        let line_start = prefix[..line_end].rfind('\n').map_or(0, |pos| pos + 1);
        let line = &prefix[line_start..line_end];
        let found = pattern
            .find_iter(line)
            .filter(|m| {
                // Word-bounded: the symbol must not be a prefix of a longer
                // name, and the match must sit outside string literals.
                let boundary_ok = line[m.end()..].chars().next().is_none_or(|c| !is_word_char(c));
                boundary_ok && !strings.contains(line_start + m.start())
            })
            .last();
        if let Some(m) = found {
            return Ok(SymbolDeclaration {
                symbol_name: symbol_name.to_owned(),
                line: line[m.start()..].trim().to_owned(),
            });
        }
        if line_start == 0 {
            break;
        }
        line_end = line_start - 1;
    }
    Err(TranslateError::UnresolvedSymbol(symbol_name.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declaration(line: &str) -> SymbolDeclaration {
        SymbolDeclaration {
            symbol_name: "inst".to_owned(),
            line: line.to_owned(),
        }
    }

    #[test]
    fn object_attribute_is_detected() {
        assert!(declaration("myType, object :: inst;").is_object());
        assert!(declaration("type(myType),pointer::inst;").is_object());
        assert!(!declaration("integer::inst;").is_object());
    }

    #[test]
    fn declared_type_unwraps_type_wrapper() {
        let decl = declaration("type(myType),pointer::inst;");
        assert_eq!(decl.declared_type().unwrap(), "myType");
    }

    #[test]
    fn declared_type_accepts_bare_type_word() {
        let decl = declaration("myType, object :: inst;");
        assert_eq!(decl.declared_type().unwrap(), "myType");
    }

    #[test]
    fn malformed_type_wrapper_is_rejected() {
        let decl = declaration("type(,pointer::inst;");
        assert!(matches!(
            decl.declared_type(),
            Err(TranslateError::InvalidTypeDeclaration { .. })
        ));
    }

    #[test]
    fn nearest_preceding_declaration_wins() {
        let text = "integer::p;\nreal::p;\np = cast(q);";
        let strings = StringSpans::new(text);
        let usage = text.find("p = cast").unwrap();
        let decl = find_symbol_declaration(text, "p", usage, &strings).unwrap();
        assert_eq!(decl.line, "real::p;");
    }

    #[test]
    fn declaration_name_list_is_word_bounded() {
        let text = "integer::pp;\np = cast(q);";
        let strings = StringSpans::new(text);
        let usage = text.find("p = cast").unwrap();
        let result = find_symbol_declaration(text, "p", usage, &strings);
        assert!(matches!(result, Err(TranslateError::UnresolvedSymbol(_))));
    }

    #[test]
    fn multi_name_declaration_matches_any_member() {
        let text = "real::a, b, c;\nb = cast(q);";
        let strings = StringSpans::new(text);
        let usage = text.find("b = cast").unwrap();
        let decl = find_symbol_declaration(text, "b", usage, &strings).unwrap();
        assert!(decl.line.starts_with("real::"));
    }
}
