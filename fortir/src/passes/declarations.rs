//! Pass 3: hoist inline local variable declarations to the top of their
//! block.

use crate::blocks::{find_declaring_blocks, is_innermost_owner, Block};
use crate::constants::INLINE_DECL_RE;
use crate::error::TranslateError;
use crate::rewrite::{apply_edits, CodeEdit};
use crate::scanner::StringSpans;

/// Split every `<type-and-attrs>::<id> = <expr>` statement in a declaring
/// block into a declaration-only statement hoisted to the top of the block
/// (original order preserved) and a bare assignment left in place.
///
/// A `do` loop header declaring its own induction variable keeps the `do`
/// keyword inline (`do <id> = <expr>`) while the type declaration is
/// hoisted without the `do` prefix.
pub fn hoist_local_declarations(text: &str) -> Result<String, TranslateError> {
    let strings = StringSpans::new(text);
    let blocks = find_declaring_blocks(text, &strings)?;
    let mut edits = Vec::new();

    for block in &blocks {
        let mut hoisted: Vec<String> = Vec::new();
        for (line_start, line) in body_lines(text, block) {
            if !is_innermost_owner(&blocks, block, line_start) {
                continue;
            }
            let Some(captures) = INLINE_DECL_RE().captures(line) else {
                continue;
            };
            let Some(sep) = line.find("::") else { continue };
            if strings.contains(line_start + sep) {
                continue;
            }
            let declaration = captures.get(1).map_or("", |m| m.as_str()).trim();
            let assignment = line[sep + 2..].trim_start();
            let (hoist, inline) = match split_do_prefix(declaration) {
                Some(induction_decl) => (
                    format!("{induction_decl};"),
                    format!("do {assignment}"),
                ),
                None => (format!("{declaration};"), assignment.to_owned()),
            };
            hoisted.push(hoist);
            edits.push(CodeEdit::new(line_start, line_start + line.len(), inline));
        }
        if !hoisted.is_empty() {
            edits.push(CodeEdit::insert(
                block.body_start,
                format!("\n{}\n", hoisted.join("\n")),
            ));
        }
    }

    Ok(apply_edits(text, edits)?)
}

/// When the declaration text begins with the `do` loop keyword (word-bounded,
/// so `double precision` is not a loop), return the declaration without it.
fn split_do_prefix(declaration: &str) -> Option<&str> {
    declaration
        .strip_prefix("do")
        .filter(|rest| rest.starts_with(char::is_whitespace))
        .map(str::trim_start)
}

fn body_lines<'t>(text: &'t str, block: &Block) -> Vec<(usize, &'t str)> {
    let mut lines = Vec::new();
    let mut start = block.body_start;
    for line in text[block.body_start..block.body_end].split('\n') {
        lines.push((start, line));
        start += line.len() + 1;
    }
    lines
}
