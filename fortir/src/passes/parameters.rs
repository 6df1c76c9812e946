//! Pass 2: hoist parameter type declarations into the function body.

use crate::constants::TYPED_FUNCTION_HEADER_RE;
use crate::error::TranslateError;
use crate::rewrite::{apply_edits, CodeEdit};
use crate::scanner::{find_char_forward, matching_paren, StringSpans};
use crate::symbols::VariableDeclaration;

/// Rewrite `<type> function <name>(<type>::<id>, ...)` headers: the
/// parameter list becomes bare identifiers in original order, and one
/// `type::identifier;` declaration per typed parameter is inserted
/// immediately after the function's opening delimiter.
pub fn hoist_parameter_declarations(text: &str) -> Result<String, TranslateError> {
    let strings = StringSpans::new(text);
    let mut edits = Vec::new();

    for header in TYPED_FUNCTION_HEADER_RE().find_iter(text) {
        if strings.contains(header.start()) {
            continue;
        }
        let open_paren = header.end() - 1;
        let close_paren = matching_paren(text, open_paren, &strings)
            .ok_or(TranslateError::UnbalancedBlocks { offset: open_paren })?;
        let (names, declarations) = parse_parameter_bindings(&text[open_paren + 1..close_paren]);
        if declarations.is_empty() {
            continue;
        }
        let brace = find_char_forward(text, close_paren, '{', &strings)
            .ok_or(TranslateError::UnbalancedBlocks { offset: close_paren })?;

        edits.push(CodeEdit::new(open_paren + 1, close_paren, names.join(",")));
        let hoisted: Vec<String> = declarations
            .iter()
            .map(|d| format!("{}::{};", d.declared_type, d.identifier))
            .collect();
        edits.push(CodeEdit::insert(brace + 1, format!("\n{}\n", hoisted.join("\n"))));
    }

    Ok(apply_edits(text, edits)?)
}

/// Split a parameter list on top-level commas (depth-counted, so nested
/// parentheses such as `character(len=3)` stay intact) and separate each
/// `type::identifier` binding. Parameters without `::` pass through as
/// bare identifiers with no hoisted declaration.
fn parse_parameter_bindings(params: &str) -> (Vec<String>, Vec<VariableDeclaration>) {
    let mut names = Vec::new();
    let mut declarations = Vec::new();
    for piece in split_top_level(params) {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        if let Some(sep) = piece.find("::") {
            let declared_type = piece[..sep].trim().to_owned();
            let identifier = piece[sep + 2..].trim().to_owned();
            names.push(identifier.clone());
            declarations.push(VariableDeclaration {
                declared_type,
                identifier,
            });
        } else {
            names.push(piece.to_owned());
        }
    }
    (names, declarations)
}

fn split_top_level(params: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0i64;
    let mut start = 0;
    for (i, ch) in params.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                pieces.push(&params[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push(&params[start..]);
    pieces
}
