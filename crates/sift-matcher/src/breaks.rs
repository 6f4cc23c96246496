//! Splitting text into words and camel-case humps.
//!
//! Three different splits are used by the matcher:
//!
//! - [`break_into_word_runs`] splits a pattern segment into the words that
//!   each have to match on their own (`"get value"` → `get`, `value`).
//! - [`break_into_word_parts`] splits a candidate into camel-case words
//!   (`"UIElement"` → `UI`, `Element`).
//! - [`break_into_character_parts`] splits a pattern word into humps, where
//!   every uppercase letter starts a new hump (`"UIElem"` → `U`, `I`, `Elem`).
//!
//! All spans are byte ranges into the input and are returned in left-to-right
//! order without overlap.

use std::ops::Deref;
use std::sync::Arc;

use text_size::TextRange;

use crate::case::text_range;

/// Returns `true` for characters that can be part of an identifier-like word.
///
/// `@` counts as a word character only when `verbatim_prefix_is_word_char` is
/// set, so that patterns like `@class` stay a single word.
#[inline]
pub fn is_word_char(c: char, verbatim_prefix_is_word_char: bool) -> bool {
    c.is_alphanumeric() || c == '_' || (verbatim_prefix_is_word_char && c == '@')
}

/// Maximal runs of word characters (see [`is_word_char`]).
///
/// Runs of other characters are skipped entirely: `"Foo.Bar"` yields spans for
/// `Foo` and `Bar`.
pub fn break_into_word_runs(text: &str, verbatim_prefix_is_word_char: bool) -> Vec<TextRange> {
    let mut runs = Vec::new();
    let mut start = None;

    for (ix, c) in text.char_indices() {
        match (is_word_char(c, verbatim_prefix_is_word_char), start) {
            (true, None) => start = Some(ix),
            (false, Some(s)) => {
                runs.push(text_range(s, ix));
                start = None;
            }
            _ => {}
        }
    }

    if let Some(s) = start {
        runs.push(text_range(s, text.len()));
    }

    runs
}

/// Camel-case words of an identifier.
///
/// Non-alphanumeric characters separate words and belong to none of them. A new
/// word starts
///
/// - at an uppercase letter that follows a non-uppercase character,
/// - at a digit that follows a non-digit, and at a non-digit after a digit,
/// - at the last letter of an uppercase run that is followed by a lowercase
///   letter (`XMLHttp` → `XML`, `Http`; `IDisposable` → `I`, `Disposable`).
pub fn break_into_word_parts(text: &str) -> Vec<TextRange> {
    break_into_parts(text, true)
}

/// Camel-case humps of a pattern word.
///
/// Unlike [`break_into_word_parts`], every uppercase letter starts a new hump,
/// so `XML2Html` yields `X`, `M`, `L`, `2`, `Html`.
pub fn break_into_character_parts(text: &str) -> Vec<TextRange> {
    break_into_parts(text, false)
}

fn break_into_parts(text: &str, words: bool) -> Vec<TextRange> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let byte_at = |ix: usize| chars.get(ix).map_or(text.len(), |&(b, _)| b);

    let mut parts = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].1.is_alphanumeric() {
            i += 1;
            continue;
        }

        let start = i;
        let mut end = i + 1;
        while end < chars.len() {
            let prev = chars[end - 1].1;
            let cur = chars[end].1;
            if !cur.is_alphanumeric()
                || prev.is_numeric() != cur.is_numeric()
                || starts_hump(prev, cur, words)
                || (words && ends_upper_run(&chars, start, end))
            {
                break;
            }
            end += 1;
        }

        parts.push(text_range(byte_at(start), byte_at(end)));
        i = end;
    }

    parts
}

#[inline]
fn starts_hump(prev: char, cur: char, words: bool) -> bool {
    if words {
        cur.is_uppercase() && !prev.is_uppercase()
    } else {
        cur.is_uppercase()
    }
}

/// `UIElement`: the `E` belongs to `lement`, so `UI` ends right before it.
///
/// Only applies when everything since the word start is uppercase.
fn ends_upper_run(chars: &[(usize, char)], start: usize, ix: usize) -> bool {
    let Some(&(_, next)) = chars.get(ix + 1) else {
        return false;
    };
    chars[ix].1.is_uppercase()
        && next.is_lowercase()
        && chars[start..ix].iter().all(|&(_, c)| c.is_uppercase())
}

/// Word parts of a candidate string, cheap to clone and share across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringBreaks {
    spans: Arc<[TextRange]>,
}

impl StringBreaks {
    pub fn new(text: &str) -> Self {
        Self {
            spans: break_into_word_parts(text).into(),
        }
    }

    pub fn spans(&self) -> &[TextRange] {
        &self.spans
    }
}

impl Deref for StringBreaks {
    type Target = [TextRange];

    fn deref(&self) -> &[TextRange] {
        &self.spans
    }
}
