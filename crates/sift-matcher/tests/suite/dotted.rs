use pretty_assertions::assert_eq;
use sift_matcher::{MatcherOptions, PatternMatchKind, PatternMatcher};

fn container_kinds(pattern: &str, candidate: &str, container: &str) -> Vec<PatternMatchKind> {
    PatternMatcher::new(pattern, MatcherOptions::default())
        .matches_with_container(candidate, container)
        .iter()
        .map(|m| m.kind)
        .collect()
}

#[test]
fn last_segment_matches_name_and_rest_matches_container() {
    let matcher = PatternMatcher::new("Con.WL", MatcherOptions::default());
    let matches = matcher.matches_with_container("WriteLine", "System.Console");
    assert_eq!(matches.len(), 2);

    assert_eq!(matches[0].kind, PatternMatchKind::Prefix);
    assert!(matches[0].is_case_sensitive);

    assert_eq!(matches[1].kind, PatternMatchKind::CamelCase);
    assert_eq!(matches[1].camel_case_weight, Some(3));
}

#[test]
fn container_matches_come_in_container_order() {
    assert_eq!(
        container_kinds("Sys.con.WL", "WriteLine", "System.Console"),
        vec![
            PatternMatchKind::Prefix,
            PatternMatchKind::Prefix,
            PatternMatchKind::CamelCase,
        ]
    );

    let matcher = PatternMatcher::new("Sys.con.WL", MatcherOptions::default());
    let matches = matcher.matches_with_container("WriteLine", "System.Console");
    assert!(matches[0].is_case_sensitive);
    assert!(!matches[1].is_case_sensitive);
}

#[test]
fn only_trailing_container_pieces_are_considered() {
    assert_eq!(
        container_kinds("Con.WL", "WriteLine", "Outer.System.Console").len(),
        2
    );
    assert!(container_kinds("Sys.WL", "WriteLine", "System.Console").is_empty());
}

#[test]
fn shallow_container_fails() {
    assert!(container_kinds("A.B.C", "C", "B").is_empty());
    assert!(container_kinds("A.B", "B", "").is_empty());
    assert!(container_kinds("A.B", "B", "...").is_empty());
}

#[test]
fn mismatching_name_or_container_fails() {
    assert!(container_kinds("Con.WL", "ReadLine", "System.Console").is_empty());
    assert!(container_kinds("Foo.WL", "WriteLine", "System.Console").is_empty());
}

#[test]
fn empty_container_pieces_are_skipped() {
    assert_eq!(
        container_kinds("Con.WL", "WriteLine", "System..Console.").len(),
        2
    );
}

#[test]
fn undotted_pattern_ignores_container() {
    assert_eq!(
        container_kinds("WL", "WriteLine", "Anything.At.All"),
        vec![PatternMatchKind::CamelCase]
    );
}

#[test]
fn last_segment_can_be_matched_alone() {
    let matcher = PatternMatcher::new("Con.WL", MatcherOptions::default());
    let matches = matcher.matches_last_segment("WriteLine");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].kind, PatternMatchKind::CamelCase);

    assert!(matcher.matches_last_segment("Console").is_empty());
}
