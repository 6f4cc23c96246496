use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use text_size::TextRange;

/// How a pattern word matched a candidate, strongest first.
///
/// The derived ordering follows strength: `Exact < Prefix < ... < Fuzzy`, so an
/// ascending sort puts the best kinds first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternMatchKind {
    /// The candidate equals the pattern word, ignoring case.
    Exact,
    /// The candidate starts with the pattern word, ignoring case.
    Prefix,
    /// The pattern word occurs inside the candidate.
    Substring,
    /// The humps of the pattern word line up with the camel-case words of the
    /// candidate (`GIA` ⇔ `GetItemAsync`).
    CamelCase,
    /// The candidate is within a small edit distance of the pattern word.
    Fuzzy,
}

/// Result of matching one pattern word (or a whole segment) against a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PatternMatch {
    pub kind: PatternMatchKind,
    /// The match came from a single word of a segment rather than from the
    /// segment text as a whole.
    pub punctuation_stripped: bool,
    pub is_case_sensitive: bool,
    /// Only set for [`PatternMatchKind::CamelCase`]. Ranges over `0..=3`:
    /// `+1` when the matched humps were contiguous, `+2` when the match started
    /// at the first word of the candidate.
    pub camel_case_weight: Option<u8>,
    /// Only set for [`PatternMatchKind::Fuzzy`]: the edit distance, plus one
    /// when the lengths differ. Lower is better.
    pub fuzzy_weight: Option<u8>,
    /// Matched byte ranges. Empty unless
    /// [`MatcherOptions::include_matched_spans`](crate::MatcherOptions) is set.
    pub matched_spans: Vec<TextRange>,
}

impl PatternMatch {
    pub(crate) fn new(
        kind: PatternMatchKind,
        punctuation_stripped: bool,
        is_case_sensitive: bool,
    ) -> Self {
        Self {
            kind,
            punctuation_stripped,
            is_case_sensitive,
            camel_case_weight: None,
            fuzzy_weight: None,
            matched_spans: Vec::new(),
        }
    }

    pub(crate) fn with_camel_case_weight(mut self, weight: u8) -> Self {
        self.camel_case_weight = Some(weight);
        self
    }

    pub(crate) fn with_fuzzy_weight(mut self, weight: u8) -> Self {
        self.fuzzy_weight = Some(weight);
        self
    }

    pub(crate) fn with_spans(mut self, spans: Vec<TextRange>) -> Self {
        self.matched_spans = spans;
        self
    }

    pub fn rank_key(&self) -> RankKey {
        let kind_rank = match self.kind {
            PatternMatchKind::Exact => 5,
            PatternMatchKind::Prefix => 4,
            PatternMatchKind::Substring => 3,
            PatternMatchKind::CamelCase => 2,
            PatternMatchKind::Fuzzy => 1,
        };
        RankKey {
            kind_rank,
            camel_case_weight: self.camel_case_weight.unwrap_or(0),
            fuzzy_weight: Reverse(self.fuzzy_weight.unwrap_or(0)),
            case_sensitive: self.is_case_sensitive,
            whole_segment: !self.punctuation_stripped,
        }
    }
}

/// Sort key for matches; a greater key is a better match.
///
/// Compares the kind first, then the camel-case weight (higher wins) or the
/// fuzzy weight (lower wins), then prefers case-sensitive matches and finally
/// matches of the whole segment text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RankKey {
    kind_rank: u8,
    camel_case_weight: u8,
    fuzzy_weight: Reverse<u8>,
    case_sensitive: bool,
    whole_segment: bool,
}

/// The best of `matches` according to [`PatternMatch::rank_key`].
pub fn best_match(matches: &[PatternMatch]) -> Option<&PatternMatch> {
    matches.iter().max_by_key(|m| m.rank_key())
}
