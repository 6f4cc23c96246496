use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use text_size::{TextRange, TextSize};

use crate::breaks::StringBreaks;
use crate::case::{self, prefix_len, range_end, range_start, text_range, CaseSensitivity};
use crate::chunk::TextChunk;
use crate::options::MatcherOptions;
use crate::pattern_match::{PatternMatch, PatternMatchKind};
use crate::segment::Segment;

/// Matches a fixed pattern against many candidate strings.
///
/// Build one matcher per pattern (typically per keystroke) and drop it once the
/// candidate list has been filtered; the per-candidate break cache only grows.
///
/// ```
/// use sift_matcher::{MatcherOptions, PatternMatchKind, PatternMatcher};
///
/// let matcher = PatternMatcher::new("GIA", MatcherOptions::default());
/// let matches = matcher.matches("GetItemAsync");
/// assert_eq!(matches[0].kind, PatternMatchKind::CamelCase);
/// assert!(matcher.matches("SetValue").is_empty());
/// ```
#[derive(Debug)]
pub struct PatternMatcher {
    pattern: String,
    options: MatcherOptions,
    full_pattern_segment: Arc<Segment>,
    dot_separated_segments: Vec<Arc<Segment>>,
    invalid_pattern: bool,
    word_parts_cache: Mutex<HashMap<String, StringBreaks>>,
}

/// Outcome of a successful segment match.
enum SegmentMatch {
    /// The segment matched as a whole, or only the first word was asked for.
    Single(PatternMatch),
    /// One match per word of the segment.
    All(Vec<PatternMatch>),
}

impl SegmentMatch {
    fn into_vec(self) -> Vec<PatternMatch> {
        match self {
            SegmentMatch::Single(m) => vec![m],
            SegmentMatch::All(all) => all,
        }
    }

    fn into_first(self) -> Option<PatternMatch> {
        match self {
            SegmentMatch::Single(m) => Some(m),
            SegmentMatch::All(all) => all.into_iter().next(),
        }
    }
}

impl PatternMatcher {
    pub fn new(pattern: &str, options: MatcherOptions) -> Self {
        let pattern = pattern.trim();
        let verbatim = options.verbatim_identifier_prefix_is_word_character;
        let fuzzy = options.allow_fuzzy_matching;

        let full_pattern_segment = Arc::new(Segment::new(pattern, verbatim, fuzzy));
        let dot_separated_segments: Vec<Arc<Segment>> = if pattern.contains('.') {
            pattern
                .split('.')
                .filter(|piece| !piece.is_empty())
                .map(|piece| Arc::new(Segment::new(piece.trim(), verbatim, fuzzy)))
                .collect()
        } else {
            vec![Arc::clone(&full_pattern_segment)]
        };

        let invalid_pattern = dot_separated_segments.is_empty()
            || dot_separated_segments.iter().any(|segment| segment.is_invalid());

        tracing::debug!(
            target: "sift.matcher",
            segments = dot_separated_segments.len(),
            invalid = invalid_pattern,
            fuzzy,
            "built pattern matcher"
        );

        Self {
            pattern: pattern.to_owned(),
            options,
            full_pattern_segment,
            dot_separated_segments,
            invalid_pattern,
            word_parts_cache: Mutex::new(HashMap::new()),
        }
    }

    /// The trimmed pattern text.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn options(&self) -> &MatcherOptions {
        &self.options
    }

    /// `true` when the pattern has more than one `.`-separated segment.
    pub fn is_dotted_pattern(&self) -> bool {
        self.dot_separated_segments.len() > 1
    }

    /// `true` when the pattern can never match anything (empty, or some segment
    /// has no word characters).
    pub fn is_invalid_pattern(&self) -> bool {
        self.invalid_pattern
    }

    /// Matches `candidate` against the whole pattern, dots included.
    ///
    /// Returns one match when the pattern matched as a whole or has a single
    /// word, otherwise one match per word. An empty vector means no match.
    pub fn matches(&self, candidate: &str) -> Vec<PatternMatch> {
        if self.skip_match(candidate) {
            return Vec::new();
        }

        self.with_fuzzy_fallback(|fuzzy| {
            self.match_segment(candidate, &self.full_pattern_segment, true, fuzzy)
        })
        .map(SegmentMatch::into_vec)
        .unwrap_or_default()
    }

    /// Matches a dotted pattern against a candidate and its container.
    ///
    /// The last segment has to match `candidate`; every earlier segment has to
    /// match the corresponding trailing piece of `dotted_container`, e.g. `Con.WL`
    /// against `WriteLine` in `System.Console`. Container matches come first, in
    /// container order, and carry spans relative to `dotted_container`.
    pub fn matches_with_container(
        &self,
        candidate: &str,
        dotted_container: &str,
    ) -> Vec<PatternMatch> {
        if self.skip_match(candidate) {
            return Vec::new();
        }

        self.with_fuzzy_fallback(|fuzzy| self.match_dotted(candidate, dotted_container, fuzzy))
            .unwrap_or_default()
    }

    /// Matches only the last dotted segment against `candidate`.
    pub fn matches_last_segment(&self, candidate: &str) -> Vec<PatternMatch> {
        if self.skip_match(candidate) {
            return Vec::new();
        }
        let Some(last) = self.dot_separated_segments.last() else {
            return Vec::new();
        };

        self.with_fuzzy_fallback(|fuzzy| self.match_segment(candidate, last, true, fuzzy))
            .map(SegmentMatch::into_vec)
            .unwrap_or_default()
    }

    /// Like [`Self::matches`], but only returns the match of the first word.
    ///
    /// Every word still has to match; the other matches are just not collected.
    pub fn first_match(&self, candidate: &str) -> Option<PatternMatch> {
        if self.skip_match(candidate) {
            return None;
        }

        self.with_fuzzy_fallback(|fuzzy| {
            self.match_segment(candidate, &self.full_pattern_segment, false, fuzzy)
        })
        .and_then(SegmentMatch::into_first)
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        self.first_match(candidate).is_some()
    }

    /// Number of candidates whose word breaks are currently cached.
    pub fn cached_candidate_count(&self) -> usize {
        self.word_parts_cache.lock().len()
    }

    /// Drops all cached candidate breaks.
    pub fn clear_cache(&self) {
        self.word_parts_cache.lock().clear();
    }

    /// Releases the matcher and everything it cached.
    ///
    /// Equivalent to dropping it; useful to make the end of a filtering session
    /// explicit.
    pub fn dispose(self) {
        tracing::trace!(
            target: "sift.matcher",
            cached = self.cached_candidate_count(),
            "disposing pattern matcher"
        );
    }

    fn skip_match(&self, candidate: &str) -> bool {
        self.invalid_pattern || candidate.trim().is_empty()
    }

    /// Runs `f` without fuzzy matching, then with it if allowed and nothing
    /// matched.
    fn with_fuzzy_fallback<T>(&self, f: impl Fn(bool) -> Option<T>) -> Option<T> {
        f(false).or_else(|| {
            if self.options.allow_fuzzy_matching {
                f(true)
            } else {
                None
            }
        })
    }

    fn match_dotted(
        &self,
        candidate: &str,
        dotted_container: &str,
        fuzzy: bool,
    ) -> Option<Vec<PatternMatch>> {
        let (last, container_segments) = self.dot_separated_segments.split_last()?;

        // Cheapest rejection first: the name itself has to match.
        let candidate_match = self.match_segment(candidate, last, true, fuzzy)?;

        let container_parts = dotted_parts(dotted_container);
        if container_segments.len() > container_parts.len() {
            return None;
        }
        let container_parts = &container_parts[container_parts.len() - container_segments.len()..];

        let mut groups = Vec::with_capacity(container_segments.len());
        for (segment, &(offset, part)) in container_segments.iter().zip(container_parts).rev() {
            let matches = self.match_segment(part, segment, true, fuzzy)?.into_vec();
            groups.push(shift_spans(matches, offset));
        }

        let mut all: Vec<PatternMatch> = groups.into_iter().rev().flatten().collect();
        all.extend(candidate_match.into_vec());
        Some(all)
    }

    fn match_segment(
        &self,
        candidate: &str,
        segment: &Segment,
        want_all_matches: bool,
        fuzzy: bool,
    ) -> Option<SegmentMatch> {
        // Matching the segment text as is lets punctuation that word splitting
        // drops take part, e.g. `@int` against `@int`. Text with spaces or `*`
        // is always a multi-word pattern.
        let total = segment.total_text_chunk();
        if !total.text().contains([' ', '*']) {
            if let Some(m) = self.match_text_chunk(candidate, total, false, fuzzy) {
                return Some(SegmentMatch::Single(m));
            }
        }

        // Every word has to match on its own.
        let chunks = segment.sub_word_text_chunks();
        match chunks {
            [] => None,
            [chunk] => self
                .match_text_chunk(candidate, chunk, true, fuzzy)
                .map(SegmentMatch::Single),
            _ if want_all_matches => chunks
                .iter()
                .map(|chunk| self.match_text_chunk(candidate, chunk, true, fuzzy))
                .collect::<Option<Vec<_>>>()
                .map(SegmentMatch::All),
            _ => {
                let mut first = None;
                for chunk in chunks {
                    let m = self.match_text_chunk(candidate, chunk, true, fuzzy)?;
                    if first.is_none() {
                        first = Some(m);
                    }
                }
                first.map(SegmentMatch::Single)
            }
        }
    }

    fn match_text_chunk(
        &self,
        candidate: &str,
        chunk: &TextChunk,
        punctuation_stripped: bool,
        fuzzy: bool,
    ) -> Option<PatternMatch> {
        let text = chunk.text();
        let spans = |range: TextRange| {
            if self.options.include_matched_spans {
                vec![range]
            } else {
                Vec::new()
            }
        };

        let found = case::find(candidate, text, CaseSensitivity::Insensitive);
        if let Some(range) = found.filter(|range| range.start() == TextSize::from(0)) {
            let m = if range_end(range) == candidate.len() {
                PatternMatch::new(PatternMatchKind::Exact, punctuation_stripped, candidate == text)
            } else {
                PatternMatch::new(
                    PatternMatchKind::Prefix,
                    punctuation_stripped,
                    candidate.starts_with(text),
                )
            };
            return Some(m.with_spans(spans(range)));
        }

        if chunk.is_lowercase() {
            // A lowercase word may only start at a word of the candidate:
            // `value` matches `GetValue`, `etval` does not.
            let parts = self.word_parts(candidate);
            for &part in parts.iter() {
                let part_text = &candidate[part];
                if let Some(len) = prefix_len(part_text, text, CaseSensitivity::Insensitive) {
                    let start = range_start(part);
                    let is_case_sensitive =
                        prefix_len(part_text, text, CaseSensitivity::Sensitive).is_some();
                    return Some(
                        PatternMatch::new(
                            PatternMatchKind::Substring,
                            punctuation_stripped,
                            is_case_sensitive,
                        )
                        .with_spans(spans(text_range(start, start + len))),
                    );
                }
            }
        } else {
            if let Some(range) = case::find(candidate, text, CaseSensitivity::Sensitive) {
                return Some(
                    PatternMatch::new(PatternMatchKind::Substring, punctuation_stripped, true)
                        .with_spans(spans(range)),
                );
            }

            if !chunk.character_spans().is_empty() {
                let parts = self.word_parts(candidate);
                for case in [CaseSensitivity::Sensitive, CaseSensitivity::Insensitive] {
                    if let Some((weight, matched)) =
                        self.try_camel_case_match(candidate, &parts, chunk, case)
                    {
                        return Some(
                            PatternMatch::new(
                                PatternMatchKind::CamelCase,
                                punctuation_stripped,
                                case == CaseSensitivity::Sensitive,
                            )
                            .with_camel_case_weight(weight)
                            .with_spans(matched),
                        );
                    }
                }
            }
        }

        if chunk.is_lowercase() {
            // `itemasync` still lands on the `I` hump of `GetItemAsync`.
            if let Some(range) = found {
                let lands_on_hump = candidate[range_start(range)..]
                    .chars()
                    .next()
                    .is_some_and(char::is_uppercase);
                if lands_on_hump {
                    return Some(
                        PatternMatch::new(PatternMatchKind::Substring, punctuation_stripped, false)
                            .with_spans(spans(range)),
                    );
                }
            }
        }

        if fuzzy {
            if let Some(weight) = chunk
                .similarity_checker()
                .and_then(|checker| checker.similarity(candidate))
            {
                return Some(
                    PatternMatch::new(PatternMatchKind::Fuzzy, punctuation_stripped, false)
                        .with_fuzzy_weight(weight),
                );
            }
        }

        None
    }

    /// Aligns the humps of `chunk` with the word parts of the candidate.
    ///
    /// Walks the candidate parts in order, letting each part consume as many
    /// consecutive humps as match a prefix of what is left of it. After the
    /// first hump within a part, further humps may only be consumed from the
    /// same part while both the previous and the current hump start with an
    /// uppercase letter: `SiUI` matches `SimpleUIElement` as `Si`+`U`+`I`.
    ///
    /// Returns the weight (`+1` contiguous, `+2` anchored at the first part) and
    /// the matched ranges (only collected when spans were requested).
    fn try_camel_case_match(
        &self,
        candidate: &str,
        candidate_parts: &[TextRange],
        chunk: &TextChunk,
        case: CaseSensitivity,
    ) -> Option<(u8, Vec<TextRange>)> {
        let pattern = chunk.text();
        let humps = chunk.character_spans();
        let starts_upper = |hump: TextRange| {
            pattern[hump]
                .chars()
                .next()
                .is_some_and(char::is_uppercase)
        };

        let mut matched_spans = Vec::new();
        let mut hump_ix = 0;
        let mut first_matched_part = None;
        let mut contiguous = None;

        for (part_ix, &part) in candidate_parts.iter().enumerate() {
            if hump_ix == humps.len() {
                break;
            }

            let mut offset = range_start(part);
            let mut remaining = &candidate[part];
            let mut matched_in_part = false;

            while hump_ix < humps.len() {
                let hump = humps[hump_ix];
                if matched_in_part && !(starts_upper(humps[hump_ix - 1]) && starts_upper(hump)) {
                    break;
                }
                let Some(len) = prefix_len(remaining, &pattern[hump], case) else {
                    break;
                };

                if self.options.include_matched_spans {
                    matched_spans.push(text_range(offset, offset + len));
                }
                matched_in_part = true;
                if first_matched_part.is_none() {
                    first_matched_part = Some(part_ix);
                }
                if contiguous.is_none() {
                    contiguous = Some(true);
                }

                offset += len;
                remaining = &remaining[len..];
                hump_ix += 1;
            }

            // A skipped part after the match started breaks contiguity.
            if !matched_in_part && contiguous.is_some() {
                contiguous = Some(false);
            }
        }

        if humps.is_empty() || hump_ix < humps.len() {
            return None;
        }

        let mut weight = 0;
        if contiguous == Some(true) {
            weight += 1;
        }
        if first_matched_part == Some(0) {
            weight += 2;
        }
        Some((weight, merge_adjacent(matched_spans)))
    }

    fn word_parts(&self, candidate: &str) -> StringBreaks {
        let mut cache = self.word_parts_cache.lock();
        if let Some(breaks) = cache.get(candidate) {
            return breaks.clone();
        }

        let breaks = StringBreaks::new(candidate);
        tracing::trace!(
            target: "sift.matcher",
            parts = breaks.len(),
            cached = cache.len() + 1,
            "cached candidate word parts"
        );
        cache.insert(candidate.to_owned(), breaks.clone());
        breaks
    }
}

/// Non-empty `.`-separated pieces of `text` with their byte offsets.
fn dotted_parts(text: &str) -> Vec<(usize, &str)> {
    let mut parts = Vec::new();
    let mut offset = 0;
    for piece in text.split('.') {
        if !piece.is_empty() {
            parts.push((offset, piece));
        }
        offset += piece.len() + 1;
    }
    parts
}

fn shift_spans(mut matches: Vec<PatternMatch>, offset: usize) -> Vec<PatternMatch> {
    let offset = TextSize::from(offset as u32);
    for m in &mut matches {
        for span in &mut m.matched_spans {
            *span = *span + offset;
        }
    }
    matches
}

fn merge_adjacent(spans: Vec<TextRange>) -> Vec<TextRange> {
    let mut merged: Vec<TextRange> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if last.end() == span.start() => *last = last.cover(span),
            _ => merged.push(span),
        }
    }
    merged
}
