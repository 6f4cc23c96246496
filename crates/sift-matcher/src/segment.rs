use crate::breaks::break_into_word_runs;
use crate::chunk::TextChunk;

/// A piece of the pattern between dots, or the whole pattern.
#[derive(Debug, Clone)]
pub struct Segment {
    total_text_chunk: TextChunk,
    sub_word_text_chunks: Vec<TextChunk>,
}

impl Segment {
    pub fn new(text: &str, verbatim_prefix_is_word_char: bool, allow_fuzzy_matching: bool) -> Self {
        let sub_word_text_chunks = break_into_word_runs(text, verbatim_prefix_is_word_char)
            .into_iter()
            .map(|run| TextChunk::new(&text[run], allow_fuzzy_matching))
            .collect();

        Self {
            total_text_chunk: TextChunk::new(text, allow_fuzzy_matching),
            sub_word_text_chunks,
        }
    }

    /// The segment text as a single chunk, punctuation included. Lets `@int`
    /// match the candidate `@int` exactly.
    pub fn total_text_chunk(&self) -> &TextChunk {
        &self.total_text_chunk
    }

    pub fn sub_word_text_chunks(&self) -> &[TextChunk] {
        &self.sub_word_text_chunks
    }

    /// A segment without any word characters can never match.
    pub fn is_invalid(&self) -> bool {
        self.sub_word_text_chunks.is_empty()
    }
}
