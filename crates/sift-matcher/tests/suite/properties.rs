use proptest::prelude::*;
use sift_matcher::{
    break_into_character_parts, break_into_word_parts, break_into_word_runs, is_word_char,
    MatcherOptions, PatternMatchKind, PatternMatcher,
};

const PROPTEST_CASES: u32 = 256;

fn arb_identifier() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,15}"
}

fn arb_text() -> impl Strategy<Value = String> {
    // Identifier-ish text sprinkled with separators and a few non-ASCII letters.
    prop::collection::vec(
        prop_oneof![
            8 => prop::sample::select(vec!['a', 'b', 'X', 'Y', 'z', 'Q', '1', '2', '_']),
            2 => prop::sample::select(vec!['.', ' ', '@', '*', '-']),
            1 => prop::sample::select(vec!['é', 'Ä', 'ß', '中']),
        ],
        0..24,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    #[test]
    fn identical_identifiers_match_exactly(ident in arb_identifier()) {
        let matcher = PatternMatcher::new(&ident, MatcherOptions::default());
        let matches = matcher.matches(&ident);
        prop_assert_eq!(matches.len(), 1);
        prop_assert_eq!(matches[0].kind, PatternMatchKind::Exact);
        prop_assert!(matches[0].is_case_sensitive);
    }

    #[test]
    fn recased_identifiers_match_exactly_ignoring_case(ident in arb_identifier()) {
        let lowered = ident.to_ascii_lowercase();
        prop_assume!(lowered != ident);

        let matcher = PatternMatcher::new(&lowered, MatcherOptions::default());
        let matches = matcher.matches(&ident);
        prop_assert_eq!(matches.len(), 1);
        prop_assert_eq!(matches[0].kind, PatternMatchKind::Exact);
        prop_assert!(!matches[0].is_case_sensitive);
    }

    #[test]
    fn matching_is_idempotent(pattern in arb_text(), candidate in arb_text()) {
        let matcher = PatternMatcher::new(&pattern, MatcherOptions::fuzzy().with_matched_spans());
        let first = matcher.matches(&candidate);
        prop_assert_eq!(&matcher.matches(&candidate), &first);
        prop_assert_eq!(
            matcher.first_match(&candidate).is_some(),
            !first.is_empty()
        );
    }

    #[test]
    fn fuzzy_kind_requires_fuzzy_matching(pattern in arb_text(), candidate in arb_text()) {
        let matcher = PatternMatcher::new(&pattern, MatcherOptions::default());
        prop_assert!(matcher
            .matches(&candidate)
            .iter()
            .all(|m| m.kind != PatternMatchKind::Fuzzy));
    }

    #[test]
    fn matched_spans_stay_inside_candidate(pattern in arb_text(), candidate in arb_text()) {
        let matcher = PatternMatcher::new(&pattern, MatcherOptions::default().with_matched_spans());
        for m in matcher.matches(&candidate) {
            for span in m.matched_spans {
                prop_assert!(u32::from(span.end()) as usize <= candidate.len());
                prop_assert!(candidate.is_char_boundary(u32::from(span.start()) as usize));
                prop_assert!(candidate.is_char_boundary(u32::from(span.end()) as usize));
            }
        }
    }

    #[test]
    fn word_runs_cover_exactly_the_word_characters(text in arb_text(), verbatim in any::<bool>()) {
        let runs = break_into_word_runs(&text, verbatim);
        let mut covered = String::new();
        let mut last_end = 0usize;
        for run in &runs {
            let start = u32::from(run.start()) as usize;
            prop_assert!(start >= last_end);
            prop_assert!(!run.is_empty());
            last_end = u32::from(run.end()) as usize;
            covered.push_str(&text[*run]);
        }
        let expected: String = text.chars().filter(|&c| is_word_char(c, verbatim)).collect();
        prop_assert_eq!(covered, expected);
    }

    #[test]
    fn word_and_character_parts_are_ordered_alphanumeric_runs(text in arb_text()) {
        for parts in [break_into_word_parts(&text), break_into_character_parts(&text)] {
            let mut last_end = 0usize;
            for part in &parts {
                prop_assert!(u32::from(part.start()) as usize >= last_end);
                prop_assert!(!part.is_empty());
                prop_assert!(text[*part].chars().all(char::is_alphanumeric));
                last_end = u32::from(part.end()) as usize;
            }
            let covered: String = parts.iter().map(|&part| &text[part]).collect();
            let expected: String = text.chars().filter(|c| c.is_alphanumeric()).collect();
            prop_assert_eq!(covered, expected);
        }
    }
}
