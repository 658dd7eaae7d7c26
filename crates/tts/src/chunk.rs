//! Splitting scripts into request-sized pieces.
//!
//! The Google Translate speech endpoint rejects text longer than 100
//! characters, so longer scripts are cut at sentence ends first and at word
//! boundaries second. The per-chunk MP3 responses are concatenated.

use promo_core::composition::wrap_text;

/// Longest text the endpoint accepts per request.
pub const MAX_CHUNK_CHARS: usize = 100;

/// Sentence terminators, including the Devanagari/Gujarati danda.
const SENTENCE_ENDS: &[char] = &['.', '!', '?', '।', '॥'];

/// Split `text` into chunks of at most `max_chars` characters.
///
/// Returns an empty list for whitespace-only input.
pub fn split_for_tts(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    for sentence in sentences(text) {
        chunks.extend(
            wrap_text(sentence, max_chars)
                .lines()
                .map(str::to_string)
                .filter(|line| !line.is_empty()),
        );
    }
    chunks
}

/// Sentences with their terminator kept, trimmed, empties dropped.
fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive(SENTENCE_ENDS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_script_is_one_chunk() {
        assert_eq!(
            split_for_tts("Get your tests done today!", MAX_CHUNK_CHARS),
            vec!["Get your tests done today!"]
        );
    }

    #[test]
    fn sentences_become_separate_chunks() {
        assert_eq!(
            split_for_tts("Book now. Results in 24 hours!", MAX_CHUNK_CHARS),
            vec!["Book now.", "Results in 24 hours!"]
        );
    }

    #[test]
    fn danda_ends_a_sentence() {
        let chunks = split_for_tts("आज ही जांच कराएं। सिटी पैथ लैब", MAX_CHUNK_CHARS);
        assert_eq!(chunks, vec!["आज ही जांच कराएं।", "सिटी पैथ लैब"]);
    }

    #[test]
    fn long_sentence_is_wrapped() {
        let text = "word ".repeat(60);
        let chunks = split_for_tts(&text, MAX_CHUNK_CHARS);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= MAX_CHUNK_CHARS));
    }

    #[test]
    fn whitespace_only_yields_nothing() {
        assert!(split_for_tts(" \n ", MAX_CHUNK_CHARS).is_empty());
    }
}
