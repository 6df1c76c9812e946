//! Pass 8: losslessly encode case-sensitive identifiers.
//!
//! The target language is case-insensitive, so any identifier carrying an
//! uppercase letter is re-encoded with lowercase letters and the reserved
//! marker character. Two encodings are computed and the shorter one wins:
//!
//! - *Per-character marking*: each uppercase character becomes its
//!   lowercase form followed by one marker.
//! - *Run-length case-shift*: a "shifted" state starts off; whenever a
//!   cased character disagrees with the state, two markers are emitted and
//!   the state flips; every character is emitted lowercased; a still-open
//!   shift is closed with two trailing markers.

use crate::constants::{CASE_MARKER, WORD_RE};
use crate::error::TranslateError;
use crate::rewrite::{apply_edits, CodeEdit};
use crate::scanner::StringSpans;

/// Replace every identifier containing an uppercase letter, outside string
/// literals, with its shorter marker encoding. Fully lowercase identifiers
/// are left untouched.
pub fn encode_case_sensitive_identifiers(text: &str) -> Result<String, TranslateError> {
    let strings = StringSpans::new(text);
    let mut edits = Vec::new();
    for word in WORD_RE().find_iter(text) {
        if strings.contains(word.start()) {
            continue;
        }
        if !word.as_str().chars().any(char::is_uppercase) {
            continue;
        }
        edits.push(CodeEdit::new(
            word.start(),
            word.end(),
            encode_identifier(word.as_str()),
        ));
    }
    Ok(apply_edits(text, edits)?)
}

/// The shorter of the two encodings; ties favor per-character marking.
fn encode_identifier(word: &str) -> String {
    let per_character = per_character_encoding(word);
    let run_length = run_length_encoding(word);
    if per_character.len() <= run_length.len() {
        per_character
    } else {
        run_length
    }
}

fn per_character_encoding(word: &str) -> String {
    let mut out = String::with_capacity(word.len() * 2);
    for ch in word.chars() {
        if ch.is_uppercase() {
            out.extend(ch.to_lowercase());
            out.push(CASE_MARKER);
        } else {
            out.push(ch);
        }
    }
    out
}

fn run_length_encoding(word: &str) -> String {
    let mut out = String::with_capacity(word.len() + 4);
    let mut shifted = false;
    for ch in word.chars() {
        // Caseless characters (digits, underscores) never flip the state.
        if (ch.is_uppercase() && !shifted) || (ch.is_lowercase() && shifted) {
            out.push(CASE_MARKER);
            out.push(CASE_MARKER);
            shifted = !shifted;
        }
        out.extend(ch.to_lowercase());
    }
    if shifted {
        out.push(CASE_MARKER);
        out.push(CASE_MARKER);
    }
    out
}
