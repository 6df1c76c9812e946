//! Scanning primitives shared by every pass.
//!
//! The dialect is scanned as raw text: these helpers classify byte offsets
//! as inside/outside string literals, match brace and parenthesis pairs by
//! depth counting, and locate the keyword governing a block delimiter.
//! Offsets are byte offsets into the current text snapshot.

/// True when a character is part of a word token. The case-encoding marker
/// `$` counts as a word character so encoded identifiers stay atomic.
#[must_use]
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// Classify `offset` by quote parity: a position is inside a string literal
/// iff the count of unescaped `'` or unescaped `"` (tracked independently)
/// in `text[..offset]` is odd.
#[must_use]
pub fn is_inside_string(text: &str, offset: usize) -> bool {
    let (single_open, double_open) = quote_parity(&text[..offset]);
    single_open || double_open
}

fn quote_parity(prefix: &str) -> (bool, bool) {
    let mut single_open = false;
    let mut double_open = false;
    let mut escaped = false;
    for ch in prefix.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '\'' => single_open = !single_open,
            '"' => double_open = !double_open,
            _ => {}
        }
    }
    (single_open, double_open)
}

/// All in-string byte ranges of a text, computed in one forward scan and
/// queried by binary search. Semantically identical to calling
/// [`is_inside_string`] at every offset, without the quadratic rescans.
#[derive(Debug, Clone)]
pub struct StringSpans {
    /// Half-open `[start, end)` ranges, sorted and disjoint.
    spans: Vec<(usize, usize)>,
}

impl StringSpans {
    /// Scan `text` once and record every in-string range.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut spans = Vec::new();
        let mut single_open = false;
        let mut double_open = false;
        let mut escaped = false;
        let mut current_start: Option<usize> = None;
        for (i, ch) in text.char_indices() {
            let was_inside = single_open || double_open;
            if escaped {
                escaped = false;
            } else {
                match ch {
                    '\\' => escaped = true,
                    '\'' => single_open = !single_open,
                    '"' => double_open = !double_open,
                    _ => {}
                }
            }
            let now_inside = single_open || double_open;
            let after = i + ch.len_utf8();
            if !was_inside && now_inside {
                current_start = Some(after);
            } else if was_inside && !now_inside {
                if let Some(start) = current_start.take() {
                    spans.push((start, after));
                }
            }
        }
        // Unterminated literal: everything to the end counts as inside.
        if let Some(start) = current_start {
            spans.push((start, text.len() + 1));
        }
        Self { spans }
    }

    /// Whether `offset` lies inside a string literal.
    #[must_use]
    pub fn contains(&self, offset: usize) -> bool {
        match self.spans.binary_search_by(|&(start, _)| start.cmp(&offset)) {
            Ok(_) => true,
            Err(idx) => idx > 0 && offset < self.spans[idx - 1].1,
        }
    }
}

/// Find the offset of the delimiter matching the opener at `open`, scanning
/// forward with a net depth count and ignoring delimiters inside strings.
/// `text[open]` must be `open_ch`. Returns `None` when the text ends before
/// depth returns to zero.
#[must_use]
pub fn matching_delimiter(
    text: &str,
    open: usize,
    strings: &StringSpans,
    open_ch: char,
    close_ch: char,
) -> Option<usize> {
    let mut depth = 0i64;
    for (rel, ch) in text[open..].char_indices() {
        let abs = open + rel;
        if strings.contains(abs) {
            continue;
        }
        if ch == open_ch {
            depth += 1;
        } else if ch == close_ch {
            depth -= 1;
            if depth == 0 {
                return Some(abs);
            }
        }
    }
    None
}

/// Matching `}` for the `{` at `open`.
#[must_use]
pub fn matching_brace(text: &str, open: usize, strings: &StringSpans) -> Option<usize> {
    matching_delimiter(text, open, strings, '{', '}')
}

/// Matching `)` for the `(` at `open`. Tolerates nested parentheses such as
/// `character(len=3)` inside the range.
#[must_use]
pub fn matching_paren(text: &str, open: usize, strings: &StringSpans) -> Option<usize> {
    matching_delimiter(text, open, strings, '(', ')')
}

/// First occurrence of `target` at or after `from` that is not inside a
/// string literal.
#[must_use]
pub fn find_char_forward(
    text: &str,
    from: usize,
    target: char,
    strings: &StringSpans,
) -> Option<usize> {
    text[from..]
        .char_indices()
        .filter(|&(_, ch)| ch == target)
        .map(|(rel, _)| from + rel)
        .find(|&abs| !strings.contains(abs))
}

/// All word-bounded occurrences of `word` in `text[..limit]` that are not
/// inside string literals.
#[must_use]
pub fn word_occurrences(text: &str, limit: usize, word: &str, strings: &StringSpans) -> Vec<usize> {
    text[..limit]
        .match_indices(word)
        .filter(|&(start, _)| {
            let before_ok = text[..start].chars().next_back().is_none_or(|c| !is_word_char(c));
            let after_ok = text[start + word.len()..]
                .chars()
                .next()
                .is_none_or(|c| !is_word_char(c));
            before_ok && after_ok && !strings.contains(start)
        })
        .map(|(start, _)| start)
        .collect()
}

/// The governing block keyword for a delimiter at `offset`: the closest
/// preceding word-bounded occurrence (by offset, not lexical priority)
/// among a closed keyword set.
#[must_use]
pub fn nearest_preceding_keyword<'k>(
    text: &str,
    offset: usize,
    keywords: &[&'k str],
    strings: &StringSpans,
) -> Option<&'k str> {
    let mut best: Option<(usize, &'k str)> = None;
    for &keyword in keywords {
        if let Some(&pos) = word_occurrences(text, offset, keyword, strings).last() {
            if best.is_none_or(|(b, _)| pos > b) {
                best = Some((pos, keyword));
            }
        }
    }
    best.map(|(_, keyword)| keyword)
}

/// The first word token at or after `from` that is not inside a string.
#[must_use]
pub fn next_word<'a>(text: &'a str, from: usize, strings: &StringSpans) -> Option<&'a str> {
    let mut start: Option<usize> = None;
    for (rel, ch) in text[from..].char_indices() {
        let abs = from + rel;
        match start {
            None => {
                if is_word_char(ch) && !strings.contains(abs) {
                    start = Some(abs);
                }
            }
            Some(s) => {
                if !is_word_char(ch) {
                    return Some(&text[s..abs]);
                }
            }
        }
    }
    start.map(|s| &text[s..])
}

/// The word token immediately preceding `before` (skipping whitespace), or
/// `None` when the preceding non-space text is not a word or sits inside a
/// string literal.
#[must_use]
pub fn preceding_word<'a>(text: &'a str, before: usize, strings: &StringSpans) -> Option<&'a str> {
    let mut end: Option<usize> = None;
    let mut start = 0;
    for (i, ch) in text[..before].char_indices().rev() {
        match end {
            None => {
                if ch.is_whitespace() {
                    continue;
                }
                if !is_word_char(ch) {
                    return None;
                }
                end = Some(i + ch.len_utf8());
                start = i;
            }
            Some(_) => {
                if is_word_char(ch) {
                    start = i;
                } else {
                    break;
                }
            }
        }
    }
    let end = end?;
    if strings.contains(start) {
        return None;
    }
    Some(&text[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_parity_classifies_positions() {
        let text = r#"x = "a!b"; ! done"#;
        let bang_in_string = text.find('!').unwrap();
        let bang_comment = text.rfind('!').unwrap();
        assert!(is_inside_string(text, bang_in_string));
        assert!(!is_inside_string(text, bang_comment));
    }

    #[test]
    fn escaped_quote_does_not_toggle() {
        let text = r#"say("a \" b") ! c"#;
        assert!(!is_inside_string(text, text.rfind('!').unwrap()));
    }

    #[test]
    fn string_spans_match_direct_classification() {
        let text = r#"a "bc" d 'ef' g"#;
        let spans = StringSpans::new(text);
        for (i, _) in text.char_indices() {
            assert_eq!(spans.contains(i), is_inside_string(text, i), "offset {i}");
        }
    }

    #[test]
    fn matching_brace_skips_string_interiors() {
        let text = r#"f { say("{"); }"#;
        let spans = StringSpans::new(text);
        let open = text.find('{').unwrap();
        assert_eq!(matching_brace(text, open, &spans), Some(text.len() - 1));
    }

    #[test]
    fn matching_brace_handles_nesting() {
        let text = "a { b { c } d } e";
        let spans = StringSpans::new(text);
        assert_eq!(matching_brace(text, 2, &spans), Some(14));
    }

    #[test]
    fn unbalanced_brace_is_none() {
        let text = "a { b { c }";
        let spans = StringSpans::new(text);
        assert_eq!(matching_brace(text, 2, &spans), None);
    }

    #[test]
    fn nearest_keyword_is_by_offset() {
        let text = "function foo() { do i=1,3 {";
        let spans = StringSpans::new(text);
        let last_brace = text.rfind('{').unwrap();
        let first_brace = text.find('{').unwrap();
        let keywords = ["function", "do"];
        assert_eq!(
            nearest_preceding_keyword(text, first_brace, &keywords, &spans),
            Some("function")
        );
        assert_eq!(
            nearest_preceding_keyword(text, last_brace, &keywords, &spans),
            Some("do")
        );
    }

    #[test]
    fn keyword_matches_are_word_bounded() {
        let text = "pseudofunction x { ";
        let spans = StringSpans::new(text);
        assert_eq!(
            nearest_preceding_keyword(text, text.len(), &["function"], &spans),
            None
        );
    }

    #[test]
    fn next_word_skips_strings() {
        let text = r#"} "quoted" else {"#;
        let spans = StringSpans::new(text);
        // The literal's interior is not a token; the bare word after it is.
        assert_eq!(next_word(text, 1, &spans), Some("else"));
    }

    #[test]
    fn preceding_word_skips_whitespace() {
        let text = "new  thing(";
        let spans = StringSpans::new(text);
        assert_eq!(preceding_word(text, text.find("thing").unwrap(), &spans), Some("new"));
        assert_eq!(preceding_word(text, 0, &spans), None);
    }
}
