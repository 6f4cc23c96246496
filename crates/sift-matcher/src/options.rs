use serde::{Deserialize, Serialize};

/// Knobs fixed at [`PatternMatcher`](crate::PatternMatcher) construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatcherOptions {
    /// Treat `@` as a word character when splitting the pattern into words, so
    /// that `@class` is matched as one word rather than as `class`.
    #[serde(default)]
    pub verbatim_identifier_prefix_is_word_character: bool,

    /// Fall back to edit-distance matching when no other strategy matches.
    #[serde(default)]
    pub allow_fuzzy_matching: bool,

    /// Record which ranges of the candidate each match covered.
    ///
    /// Off by default since only highlighting needs them.
    #[serde(default)]
    pub include_matched_spans: bool,
}

impl MatcherOptions {
    pub fn fuzzy() -> Self {
        Self {
            allow_fuzzy_matching: true,
            ..Self::default()
        }
    }

    pub fn with_matched_spans(mut self) -> Self {
        self.include_matched_spans = true;
        self
    }

    pub fn with_verbatim_identifier_prefix(mut self) -> Self {
        self.verbatim_identifier_prefix_is_word_character = true;
        self
    }
}
