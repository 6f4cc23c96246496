use sift_matcher::{best_match, MatcherOptions, PatternMatchKind, PatternMatcher};

#[test]
fn near_miss_only_matches_when_fuzzy_is_enabled() {
    let strict = PatternMatcher::new("WirteLine", MatcherOptions::default());
    assert!(strict.matches("WriteLine").is_empty());

    let fuzzy = PatternMatcher::new("WirteLine", MatcherOptions::fuzzy());
    let matches = fuzzy.matches("WriteLine");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].kind, PatternMatchKind::Fuzzy);
    assert!(!matches[0].is_case_sensitive);
    assert_eq!(fuzzy.first_match("WriteLine").map(|m| m.kind), Some(PatternMatchKind::Fuzzy));
}

#[test]
fn closer_near_misses_rank_higher() {
    let fuzzy = PatternMatcher::new("WirteLine", MatcherOptions::fuzzy());
    let transposed = fuzzy.matches("WriteLine");
    let extended = fuzzy.matches("WriteLines");
    assert_eq!(transposed[0].fuzzy_weight, Some(1));
    // One transposition, one insertion, and the lengths differ.
    assert_eq!(extended[0].fuzzy_weight, Some(3));
    assert!(transposed[0].rank_key() > extended[0].rank_key());

    let all = [extended[0].clone(), transposed[0].clone()];
    assert_eq!(best_match(&all), Some(&transposed[0]));

    let strict = PatternMatcher::new("Write", MatcherOptions::fuzzy());
    assert_eq!(strict.matches("WriteLine")[0].fuzzy_weight, None);
}

#[test]
fn casing_differences_are_exact_not_fuzzy() {
    let fuzzy = PatternMatcher::new("Writeline", MatcherOptions::fuzzy());
    let matches = fuzzy.matches("WriteLine");
    assert_eq!(matches[0].kind, PatternMatchKind::Exact);
    assert!(!matches[0].is_case_sensitive);
}

#[test]
fn fuzzy_is_only_a_fallback() {
    let fuzzy = PatternMatcher::new("Write", MatcherOptions::fuzzy());
    assert_eq!(fuzzy.matches("WriteLine")[0].kind, PatternMatchKind::Prefix);
    // `Write` is contained in `WriteLine`, but substrings are not "similar".
    assert!(fuzzy.matches("ReWriteLine").iter().all(|m| m.kind != PatternMatchKind::Fuzzy));
}

#[test]
fn short_words_tolerate_a_single_edit() {
    let fuzzy = PatternMatcher::new("Gte", MatcherOptions::fuzzy());
    assert_eq!(fuzzy.matches("Get")[0].kind, PatternMatchKind::Fuzzy);
    assert!(fuzzy.matches("Gxtz").is_empty());
}

#[test]
fn disabled_fuzzy_never_reports_fuzzy_matches() {
    let pairs = [
        ("WirteLine", "WriteLine"),
        ("Gte", "Get"),
        ("Conosle", "Console"),
        ("Strng", "String"),
        ("Dictionray", "Dictionary"),
    ];
    for (pattern, candidate) in pairs {
        let matcher = PatternMatcher::new(pattern, MatcherOptions::default());
        assert!(
            matcher
                .matches(candidate)
                .iter()
                .all(|m| m.kind != PatternMatchKind::Fuzzy),
            "pattern={pattern:?} candidate={candidate:?}"
        );
        let fuzzy = PatternMatcher::new(pattern, MatcherOptions::fuzzy());
        assert!(fuzzy.is_match(candidate), "pattern={pattern:?} candidate={candidate:?}");
    }
}

#[test]
fn fuzzy_applies_to_dotted_matching() {
    let fuzzy = PatternMatcher::new("Conosle.WirteLine", MatcherOptions::fuzzy());
    let matches = fuzzy.matches_with_container("WriteLine", "System.Console");
    assert_eq!(matches.len(), 2);
    assert!(matches.iter().all(|m| m.kind == PatternMatchKind::Fuzzy));

    let strict = PatternMatcher::new("Conosle.WirteLine", MatcherOptions::default());
    assert!(strict.matches_with_container("WriteLine", "System.Console").is_empty());
}
