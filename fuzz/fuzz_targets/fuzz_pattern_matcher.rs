#![no_main]

use libfuzzer_sys::fuzz_target;
use sift_matcher::{MatcherOptions, PatternMatchKind, PatternMatcher};

mod utils;

use utils::{assert_safe_slice, truncate_utf8};

fuzz_target!(|data: &[u8]| {
    let Some((&flags, rest)) = data.split_first() else {
        return;
    };
    let Some(text) = truncate_utf8(rest) else {
        return;
    };

    // Input layout: one flag byte, then `pattern\ncontainer\ncandidate`.
    let mut lines = text.splitn(3, '\n');
    let pattern = lines.next().unwrap_or_default();
    let container = lines.next().unwrap_or_default();
    let candidate = lines.next().unwrap_or_default();

    let options = MatcherOptions {
        verbatim_identifier_prefix_is_word_character: flags & 1 != 0,
        allow_fuzzy_matching: flags & 2 != 0,
        include_matched_spans: true,
    };
    let matcher = PatternMatcher::new(pattern, options);

    let matches = matcher.matches(candidate);
    assert_eq!(matches, matcher.matches(candidate), "matching must be deterministic");
    for m in &matches {
        assert!(options.allow_fuzzy_matching || m.kind != PatternMatchKind::Fuzzy);
        for span in &m.matched_spans {
            assert_safe_slice(candidate, span.start().into(), span.end().into());
        }
    }
    assert_eq!(matcher.is_match(candidate), !matches.is_empty());

    // Dotted queries only have to not panic.
    let _ = matcher.matches_with_container(candidate, container);
    let _ = matcher.matches_last_segment(candidate);
});
