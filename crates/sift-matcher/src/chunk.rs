use text_size::TextRange;

use crate::breaks::break_into_character_parts;
use crate::case::contains_upper;
use crate::similarity::SimilarityChecker;

/// One word of a pattern, with its humps precomputed.
#[derive(Debug, Clone)]
pub struct TextChunk {
    text: String,
    character_spans: Vec<TextRange>,
    is_lowercase: bool,
    similarity_checker: Option<SimilarityChecker>,
}

impl TextChunk {
    pub fn new(text: &str, allow_fuzzy_matching: bool) -> Self {
        Self {
            text: text.to_owned(),
            character_spans: break_into_character_parts(text),
            is_lowercase: !contains_upper(text),
            similarity_checker: allow_fuzzy_matching.then(|| SimilarityChecker::new(text)),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Camel-case humps of [`Self::text`], see
    /// [`break_into_character_parts`](crate::break_into_character_parts).
    pub fn character_spans(&self) -> &[TextRange] {
        &self.character_spans
    }

    /// `true` when the text has no uppercase letters. Lowercase words only match
    /// at word boundaries of the candidate and never as camel case.
    pub fn is_lowercase(&self) -> bool {
        self.is_lowercase
    }

    /// Present only when fuzzy matching was enabled.
    pub fn similarity_checker(&self) -> Option<&SimilarityChecker> {
        self.similarity_checker.as_ref()
    }
}
