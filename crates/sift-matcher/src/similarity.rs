use crate::case::fold_char;

/// Added to the similarity weight when the lengths differ, so that same-length
/// typos (`Wirte` for `Write`) rank above insertions and deletions.
const LENGTH_MISMATCH_PENALTY: u8 = 1;

/// Decides whether a candidate is a near-miss of a fixed word.
///
/// Comparison is case-insensitive and based on a bounded Damerau-Levenshtein
/// distance (optimal string alignment). Words of up to four characters tolerate
/// one edit, longer words two. A candidate that merely contains the word is
/// not similar to it.
#[derive(Debug, Clone)]
pub struct SimilarityChecker {
    source: String,
    source_folded: Vec<char>,
    threshold: usize,
}

impl SimilarityChecker {
    pub fn new(source: &str) -> Self {
        let source_folded: Vec<char> = source.chars().map(fold_char).collect();
        let threshold = threshold_for(source_folded.len());
        Self {
            source: source.to_owned(),
            source_folded,
            threshold,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Maximum edit distance accepted for this source word.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Similarity weight of `candidate`, lower is better, or `None` when the
    /// candidate is not similar.
    ///
    /// The weight is the edit distance, plus one when the lengths differ.
    pub fn similarity(&self, candidate: &str) -> Option<u8> {
        let candidate_folded: Vec<char> = candidate.chars().map(fold_char).collect();
        let distance = bounded_distance(&self.source_folded, &candidate_folded, self.threshold)?;
        let mut weight = u8::try_from(distance).ok()?;
        if candidate_folded.len() != self.source_folded.len() {
            weight += LENGTH_MISMATCH_PENALTY;
        }
        Some(weight)
    }

    pub fn are_similar(&self, candidate: &str) -> bool {
        self.similarity(candidate).is_some()
    }
}

fn threshold_for(len: usize) -> usize {
    if len <= 4 {
        1
    } else {
        2
    }
}

/// Case-insensitive edit distance between `a` and `b`, counting insertions,
/// deletions, substitutions and transpositions of adjacent characters.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().map(fold_char).collect();
    let b: Vec<char> = b.chars().map(fold_char).collect();
    let bound = a.len().max(b.len());
    bounded_distance(&a, &b, bound).unwrap_or(bound)
}

/// Optimal string alignment distance, giving up as soon as it is known to
/// exceed `threshold`.
fn bounded_distance(a: &[char], b: &[char], threshold: usize) -> Option<usize> {
    if a.len().abs_diff(b.len()) > threshold {
        return None;
    }
    if a.is_empty() || b.is_empty() {
        return Some(a.len().max(b.len()));
    }

    let m = b.len();
    let mut prev_prev = vec![0usize; m + 1];
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut cur = vec![0usize; m + 1];

    for i in 1..=a.len() {
        cur[0] = i;
        let mut row_min = i;
        for j in 1..=m {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut value = (prev[j] + 1).min(cur[j - 1] + 1).min(prev[j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                value = value.min(prev_prev[j - 2] + 1);
            }
            cur[j] = value;
            row_min = row_min.min(value);
        }

        // A transposition can only lower the next row to a value already
        // reachable in this one, so the row minimum is a lower bound.
        if row_min > threshold {
            return None;
        }

        std::mem::swap(&mut prev_prev, &mut prev);
        std::mem::swap(&mut prev, &mut cur);
    }

    let distance = prev[m];
    (distance <= threshold).then_some(distance)
}
