mod dotted;
mod fuzzy;
mod logging;
mod properties;

use sift_matcher::{MatcherOptions, PatternMatchKind, PatternMatcher};

pub(crate) fn kinds(pattern: &str, candidate: &str) -> Vec<PatternMatchKind> {
    PatternMatcher::new(pattern, MatcherOptions::default())
        .matches(candidate)
        .iter()
        .map(|m| m.kind)
        .collect()
}
