//! Positional edit list and the batch applier.
//!
//! Every pass scans the current text, collects [`CodeEdit`]s over byte
//! ranges, and applies them in one batch. Edits within a batch must not
//! overlap; the applier validates this and replaces ranges in descending
//! start order, so applying one edit never invalidates the offsets of the
//! edits still pending.
//!
//! # Usage
//!
//! ```
//! use fortir::rewrite::{apply_edits, CodeEdit};
//!
//! let source = "hello world";
//! let edited = apply_edits(source, vec![CodeEdit::new(0, 5, "hi")]).unwrap();
//! assert_eq!(edited, "hi world");
//! ```

/// A single text replacement over the half-open byte range `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEdit {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Replacement content.
    pub replacement: String,
}

impl CodeEdit {
    /// Create a replacement edit.
    #[must_use]
    pub fn new(start: usize, end: usize, replacement: impl Into<String>) -> Self {
        Self {
            start,
            end,
            replacement: replacement.into(),
        }
    }

    /// Create a zero-width insertion before `position`.
    #[must_use]
    pub fn insert(position: usize, content: impl Into<String>) -> Self {
        Self::new(position, position, content)
    }

    /// Check whether this edit's range overlaps another's.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Error raised when an edit batch violates the applier's contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RewriteError {
    /// Two edits in the same batch have overlapping ranges.
    #[error("overlapping edits at indices {edit_a} and {edit_b}")]
    OverlappingEdits {
        /// Index of the first overlapping edit.
        edit_a: usize,
        /// Index of the second overlapping edit.
        edit_b: usize,
    },
    /// An edit's range extends past the end of the text.
    #[error("edit {edit_index} out of bounds: end {end} > text length {text_len}")]
    OutOfBounds {
        /// Index of the bad edit.
        edit_index: usize,
        /// End byte of the edit.
        end: usize,
        /// Length of the text.
        text_len: usize,
    },
}

/// Apply a batch of non-overlapping edits to `text`.
///
/// Edits are applied in descending start order (ties broken by descending
/// end, so a zero-width insertion at a replacement's start position lands
/// before the replacement's new content). All untouched edits lie strictly
/// before the edit being applied, so stored offsets stay valid throughout.
///
/// # Errors
/// Returns an error if any two edits overlap or any range is out of bounds.
pub fn apply_edits(text: &str, edits: Vec<CodeEdit>) -> Result<String, RewriteError> {
    validate(text, &edits)?;

    let mut sorted = edits;
    sorted.sort_by(|a, b| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));

    let mut result = text.to_owned();
    for edit in sorted {
        result.replace_range(edit.start..edit.end, &edit.replacement);
    }
    Ok(result)
}

fn validate(text: &str, edits: &[CodeEdit]) -> Result<(), RewriteError> {
    for (i, edit) in edits.iter().enumerate() {
        if edit.end > text.len() || edit.start > edit.end {
            return Err(RewriteError::OutOfBounds {
                edit_index: i,
                end: edit.end,
                text_len: text.len(),
            });
        }
    }
    for i in 0..edits.len() {
        for j in (i + 1)..edits.len() {
            if edits[i].overlaps(&edits[j]) {
                return Err(RewriteError::OverlappingEdits {
                    edit_a: i,
                    edit_b: j,
                });
            }
        }
    }
    Ok(())
}

/// Collapse runs of consecutive spaces to a single space and drop lines
/// that are empty after trimming.
///
/// Space runs inside string literals are preserved. Called only where a
/// pass explicitly asks for cleanup (after brace removal), not after every
/// pass.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    for line in text.split('\n') {
        let collapsed = collapse_line(line);
        if !collapsed.trim().is_empty() {
            lines.push(collapsed);
        }
    }
    lines.join("\n")
}

fn collapse_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut single_open = false;
    let mut double_open = false;
    let mut escaped = false;
    let mut prev_space = false;
    for ch in line.chars() {
        let in_string = single_open || double_open;
        if ch == ' ' && !in_string {
            if !prev_space {
                out.push(' ');
            }
            prev_space = true;
            continue;
        }
        prev_space = false;
        if escaped {
            escaped = false;
        } else {
            match ch {
                '\\' if in_string => escaped = true,
                '\'' => single_open = !single_open,
                '"' => double_open = !double_open,
                _ => {}
            }
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_replacement() {
        let result = apply_edits("hello world", vec![CodeEdit::new(0, 5, "hi")]).unwrap();
        assert_eq!(result, "hi world");
    }

    #[test]
    fn multiple_non_overlapping_edits() {
        let edits = vec![CodeEdit::new(0, 3, "AAA"), CodeEdit::new(8, 11, "CCC")];
        let result = apply_edits("aaa bbb ccc", edits).unwrap();
        assert_eq!(result, "AAA bbb CCC");
    }

    #[test]
    fn overlapping_edits_error() {
        let edits = vec![CodeEdit::new(0, 8, "hi"), CodeEdit::new(5, 10, "there")];
        let result = apply_edits("hello world", edits);
        assert!(matches!(result, Err(RewriteError::OverlappingEdits { .. })));
    }

    #[test]
    fn out_of_bounds_error() {
        let result = apply_edits("short", vec![CodeEdit::new(0, 100, "long")]);
        assert!(matches!(result, Err(RewriteError::OutOfBounds { .. })));
    }

    #[test]
    fn insertion() {
        let result = apply_edits("hello world", vec![CodeEdit::insert(5, " big")]).unwrap();
        assert_eq!(result, "hello big world");
    }

    #[test]
    fn insertion_at_replacement_start_applies_after_it() {
        // The insertion must land at the original offset, before the
        // replacement's new content.
        let edits = vec![CodeEdit::new(4, 7, "YYY"), CodeEdit::insert(4, "X")];
        let result = apply_edits("abc defg", edits).unwrap();
        assert_eq!(result, "abc XYYYg");
    }

    #[test]
    fn adjacent_edits_do_not_overlap() {
        let edits = vec![CodeEdit::new(0, 3, "XXX"), CodeEdit::new(3, 6, "YYY")];
        let result = apply_edits("abcdef", edits).unwrap();
        assert_eq!(result, "XXXYYY");
    }

    #[test]
    fn empty_batch_is_identity() {
        assert_eq!(apply_edits("unchanged", Vec::new()).unwrap(), "unchanged");
    }

    #[test]
    fn collapse_drops_blank_lines_and_space_runs() {
        let text = "a    b\n\n   \nc";
        assert_eq!(collapse_whitespace(text), "a b\nc");
    }

    #[test]
    fn collapse_preserves_spaces_inside_strings() {
        let text = "x =   \"a    b\";";
        assert_eq!(collapse_whitespace(text), "x = \"a    b\";");
    }
}
