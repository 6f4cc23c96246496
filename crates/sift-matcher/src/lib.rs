//! Pattern matching for "type to filter" experiences.
//!
//! A [`PatternMatcher`] is built once from the text a user typed and then
//! queried against many candidate strings (symbol names, file names, ...).
//! Every query runs the same pipeline, stopping at the first strategy that
//! succeeds:
//!
//! 1. exact match (case-insensitive, with a case-sensitivity flag),
//! 2. prefix match,
//! 3. substring match aligned to a word part of the candidate,
//! 4. camel-case match (`GIA` ⇔ `GetItemAsync`),
//! 5. optionally, a fuzzy edit-distance match for near-miss typos.
//!
//! ## Segments
//!
//! Patterns are split on `.` into segments. [`PatternMatcher::matches`] treats
//! the pattern as a single segment, while
//! [`PatternMatcher::matches_with_container`] matches the last segment against
//! the candidate and the remaining segments, right to left, against the dotted
//! container (`Con.WL` ⇔ `System.Console` + `WriteLine`).
//!
//! Within a segment, every word (maximal run of letters, digits and `_`) has to
//! match on its own for the segment to match.
//!
//! ## Offsets
//!
//! All spans are byte offsets into the string they were computed from, expressed
//! as [`TextRange`]s. Case-insensitive comparisons use simple per-`char`
//! lowercase folding.
//!
//! ## Threading
//!
//! A matcher is `Send + Sync`. The only mutable state is a per-matcher cache of
//! candidate word breaks guarded by a single mutex. The cache is unbounded, so a
//! matcher should live for one filtering session and then be dropped.

#![forbid(unsafe_code)]

mod breaks;
mod case;
mod chunk;
mod matcher;
mod options;
mod pattern_match;
mod segment;
mod similarity;

pub use breaks::{
    break_into_character_parts, break_into_word_parts, break_into_word_runs, is_word_char,
    StringBreaks,
};
pub use chunk::TextChunk;
pub use matcher::PatternMatcher;
pub use options::MatcherOptions;
pub use pattern_match::{best_match, PatternMatch, PatternMatchKind, RankKey};
pub use segment::Segment;
pub use similarity::{edit_distance, SimilarityChecker};
pub use text_size::{TextRange, TextSize};
