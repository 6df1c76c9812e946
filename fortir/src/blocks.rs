//! Discovery of brace-delimited block regions by introducing keyword.
//!
//! Blocks are computed on demand from the current text and never cached
//! between passes: each pass re-derives the regions it needs.

use crate::constants::DECLARING_BLOCK_KEYWORDS;
use crate::error::TranslateError;
use crate::scanner::{find_char_forward, matching_brace, word_occurrences, StringSpans};

/// A brace-delimited region governed by an introducing keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The introducing keyword (`function`, `subroutine`, `program`, ...).
    pub keyword: &'static str,
    /// Trimmed text between the keyword and the opening delimiter.
    pub header_text: String,
    /// Offset just past the opening `{`.
    pub body_start: usize,
    /// Offset of the matching `}`.
    pub body_end: usize,
}

impl Block {
    /// Whether `offset` lies inside this block's body.
    #[must_use]
    pub fn body_contains(&self, offset: usize) -> bool {
        (self.body_start..self.body_end).contains(&offset)
    }

    /// Whether `other`'s body lies strictly inside this block's body.
    #[must_use]
    pub fn encloses(&self, other: &Self) -> bool {
        self.body_start < other.body_start && other.body_end < self.body_end
    }
}

/// A [`Block`] carrying the declared function name (the text between the
/// `function` keyword and the parameter list).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionBlock {
    /// Declared name.
    pub name: String,
    /// The underlying block region.
    pub block: Block,
}

/// Whether `block` is the smallest block in `blocks` whose body contains
/// `offset`. Statements and call sites are attributed to their innermost
/// enclosing block when declaring blocks nest.
#[must_use]
pub fn is_innermost_owner(blocks: &[Block], block: &Block, offset: usize) -> bool {
    block.body_contains(offset)
        && !blocks
            .iter()
            .any(|nested| block.encloses(nested) && nested.body_contains(offset))
}

/// Enumerate every block introduced by `keyword`: each word-bounded header
/// occurrence outside string literals, paired with the matching closing
/// delimiter found by brace-depth scanning.
///
/// # Errors
/// Returns [`TranslateError::UnbalancedBlocks`] when a header's opening
/// delimiter has no match.
pub fn find_blocks(
    text: &str,
    keyword: &'static str,
    strings: &StringSpans,
) -> Result<Vec<Block>, TranslateError> {
    let mut blocks = Vec::new();
    for start in word_occurrences(text, text.len(), keyword, strings) {
        let header_start = start + keyword.len();
        // A keyword with no following block (e.g. near end of text) is not
        // a header.
        let Some(brace) = find_char_forward(text, header_start, '{', strings) else {
            continue;
        };
        let close = matching_brace(text, brace, strings)
            .ok_or(TranslateError::UnbalancedBlocks { offset: brace })?;
        blocks.push(Block {
            keyword,
            header_text: text[header_start..brace].trim().to_owned(),
            body_start: brace + 1,
            body_end: close,
        });
    }
    Ok(blocks)
}

/// [`find_blocks`] specialized to headers that carry a name: the captured
/// name is the header text up to the parameter list.
///
/// # Errors
/// Same conditions as [`find_blocks`].
pub fn find_function_blocks(
    text: &str,
    keyword: &'static str,
    strings: &StringSpans,
) -> Result<Vec<FunctionBlock>, TranslateError> {
    Ok(find_blocks(text, keyword, strings)?
        .into_iter()
        .map(|block| {
            let name = block
                .header_text
                .split('(')
                .next()
                .unwrap_or_default()
                .trim()
                .to_owned();
            FunctionBlock { name, block }
        })
        .collect())
}

/// All blocks of the kinds whose bodies hold variable declarations
/// (function/subroutine/program).
///
/// # Errors
/// Same conditions as [`find_blocks`].
pub fn find_declaring_blocks(
    text: &str,
    strings: &StringSpans,
) -> Result<Vec<Block>, TranslateError> {
    let mut blocks = Vec::new();
    for keyword in DECLARING_BLOCK_KEYWORDS {
        blocks.extend(find_blocks(text, keyword, strings)?);
    }
    Ok(blocks)
}
