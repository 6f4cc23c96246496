//! Case handling shared by the matcher, the breakers and the similarity checker.

use text_size::{TextRange, TextSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CaseSensitivity {
    Sensitive,
    Insensitive,
}

impl CaseSensitivity {
    #[inline]
    pub(crate) fn chars_eq(self, a: char, b: char) -> bool {
        match self {
            CaseSensitivity::Sensitive => a == b,
            CaseSensitivity::Insensitive => a == b || fold_char(a) == fold_char(b),
        }
    }
}

/// Simple lowercase folding of a single `char`.
///
/// Characters whose lowercase form expands to several scalar values fold to the
/// first of them; this keeps comparisons char-for-char.
#[inline]
pub(crate) fn fold_char(c: char) -> char {
    if c.is_ascii() {
        return c.to_ascii_lowercase();
    }
    c.to_lowercase().next().unwrap_or(c)
}

#[inline]
pub(crate) fn text_range(start: usize, end: usize) -> TextRange {
    TextRange::new(TextSize::from(start as u32), TextSize::from(end as u32))
}

#[inline]
pub(crate) fn range_start(range: TextRange) -> usize {
    u32::from(range.start()) as usize
}

#[inline]
pub(crate) fn range_end(range: TextRange) -> usize {
    u32::from(range.end()) as usize
}

pub(crate) fn contains_upper(text: &str) -> bool {
    text.chars().any(char::is_uppercase)
}

/// If `haystack` starts with `needle`, returns how many bytes of `haystack` the
/// needle covered.
pub(crate) fn prefix_len(haystack: &str, needle: &str, case: CaseSensitivity) -> Option<usize> {
    if case == CaseSensitivity::Sensitive {
        return haystack.starts_with(needle).then_some(needle.len());
    }

    let mut hay = haystack.char_indices();
    for n in needle.chars() {
        let (_, h) = hay.next()?;
        if !case.chars_eq(h, n) {
            return None;
        }
    }
    Some(hay.next().map_or(haystack.len(), |(ix, _)| ix))
}

/// First occurrence of `needle` in `haystack`.
pub(crate) fn find(haystack: &str, needle: &str, case: CaseSensitivity) -> Option<TextRange> {
    if case == CaseSensitivity::Sensitive {
        return haystack
            .find(needle)
            .map(|start| text_range(start, start + needle.len()));
    }

    if needle.is_empty() {
        return Some(text_range(0, 0));
    }

    haystack.char_indices().find_map(|(start, _)| {
        prefix_len(&haystack[start..], needle, case).map(|len| text_range(start, start + len))
    })
}
