use crate::sequence::shape;
use crate::vocabulary::{TokenId, Vocabulary, UNK_ID};
use std::sync::Arc;

/// Only the most frequent words the models were trained on get an id.
pub const DEFAULT_VOCAB_LIMIT: TokenId = 10_000;

/// Converts raw review text into token ids.
///
/// Words known to the vocabulary but ranked at or past `vocab_limit` are
/// dropped, while words the vocabulary has never seen become `<UNK>`. The
/// models were trained on sequences built exactly this way, so the two
/// cases must stay different.
pub fn normalize(raw_text: &str, vocabulary: &Vocabulary, vocab_limit: TokenId) -> Vec<TokenId> {
    let cleaned: String = raw_text
        .to_lowercase()
        .chars()
        .filter(|&c| c.is_ascii_alphabetic() || is_separator(c))
        .collect();

    cleaned
        .split(is_separator)
        .filter(|word| !word.is_empty())
        .filter_map(|word| match vocabulary.get(word) {
            Some(id) if id < vocab_limit => Some(id),
            Some(_) => None,
            None => Some(UNK_ID),
        })
        .collect()
}

// Unicode whitespace plus the ASCII information separators U+001C..U+001F,
// which the training pipeline also split on.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Normalizer and shaper bound to one vocabulary and sequence length.
#[derive(Debug, Clone)]
pub struct TextProcessor {
    vocabulary: Arc<Vocabulary>,
    vocab_limit: TokenId,
    max_length: usize,
}

impl TextProcessor {
    pub fn new(vocabulary: Arc<Vocabulary>, vocab_limit: TokenId, max_length: usize) -> Self {
        Self {
            vocabulary,
            vocab_limit,
            max_length,
        }
    }

    pub fn normalize(&self, raw_text: &str) -> Vec<TokenId> {
        normalize(raw_text, &self.vocabulary, self.vocab_limit)
    }

    /// Normalizes and shapes `raw_text` into a model-ready vector of exactly
    /// `max_length` ids.
    pub fn process(&self, raw_text: &str) -> Vec<TokenId> {
        shape(self.normalize(raw_text), self.max_length)
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::PAD_ID;
    use std::collections::HashMap;

    fn create_test_vocabulary() -> Vocabulary {
        let table: HashMap<String, u32> = [
            ("this", 11),
            ("movie", 17),
            ("was", 13),
            ("absolutely", 424),
            ("wonderful", 386),
            ("and", 2),
            ("amazing", 477),
            ("the", 1),
            // Known to the index but past the vocabulary limit once offset.
            ("zeitgeist", 9_997),
            ("obscure", 40_000),
        ]
        .iter()
        .map(|(w, r)| (w.to_string(), *r))
        .collect();
        Vocabulary::build(table).unwrap()
    }

    #[test]
    fn test_normalize_known_words() {
        let vocab = create_test_vocabulary();
        let tokens = normalize("This movie was absolutely wonderful and amazing", &vocab, DEFAULT_VOCAB_LIMIT);

        assert_eq!(tokens, vec![14, 20, 16, 427, 389, 5, 480]);
    }

    #[test]
    fn test_case_folding_and_character_filtering() {
        let vocab = create_test_vocabulary();
        let tokens = normalize("THE M0vie!!! was... 'AMAZING' 10/10", &vocab, DEFAULT_VOCAB_LIMIT);

        // "M0vie" loses its digit and becomes "mvie", which is unknown.
        // "10/10" disappears entirely.
        assert_eq!(tokens, vec![4, UNK_ID, 16, 480]);
    }

    #[test]
    fn test_punctuation_joins_word_fragments() {
        let vocab = create_test_vocabulary();
        let tokens = normalize("wonder-ful and don't", &vocab, DEFAULT_VOCAB_LIMIT);

        assert_eq!(tokens, vec![389, 5, UNK_ID]);
    }

    #[test]
    fn test_only_digits_and_punctuation_yield_empty_sequence() {
        let vocab = create_test_vocabulary();

        assert!(normalize("1234 !!! ??? 5.0/10", &vocab, DEFAULT_VOCAB_LIMIT).is_empty());
        assert!(normalize("", &vocab, DEFAULT_VOCAB_LIMIT).is_empty());
        assert!(normalize("   \t\n ", &vocab, DEFAULT_VOCAB_LIMIT).is_empty());
    }

    #[test]
    fn test_high_rank_words_are_omitted_but_unknown_words_substituted() {
        let vocab = create_test_vocabulary();

        // "zeitgeist" has id 10_000, "obscure" 40_003: both are dropped.
        // "qwertyuiop" is not in the index at all: it becomes <UNK>.
        let tokens = normalize("the zeitgeist obscure qwertyuiop movie", &vocab, DEFAULT_VOCAB_LIMIT);
        assert_eq!(tokens, vec![4, UNK_ID, 20]);

        // Five input words, two omitted.
        assert_eq!(tokens.len(), 5 - 2);
    }

    #[test]
    fn test_vocab_limit_boundary_is_exclusive() {
        let vocab = create_test_vocabulary();

        assert_eq!(normalize("zeitgeist", &vocab, 10_001), vec![10_000]);
        assert!(normalize("zeitgeist", &vocab, 10_000).is_empty());
    }

    #[test]
    fn test_reserved_token_text_cannot_be_matched() {
        let vocab = create_test_vocabulary();

        // Angle brackets are stripped, so "<pad>" arrives as "pad".
        assert_eq!(normalize("<PAD> <START>", &vocab, DEFAULT_VOCAB_LIMIT), vec![UNK_ID, UNK_ID]);
    }

    #[test]
    fn test_unicode_whitespace_and_separators_split_words() {
        let vocab = create_test_vocabulary();

        let tokens = normalize("the\u{00a0}movie\u{2003}was\u{1f}amazing", &vocab, DEFAULT_VOCAB_LIMIT);
        assert_eq!(tokens, vec![4, 20, 16, 480]);
    }

    #[test]
    fn test_non_ascii_letters_are_removed() {
        let vocab = create_test_vocabulary();

        // "é" is not an ASCII letter, so "thé" shrinks to the unknown "th".
        assert_eq!(normalize("thé movie", &vocab, DEFAULT_VOCAB_LIMIT), vec![UNK_ID, 20]);
    }

    #[test]
    fn test_processor_output_is_always_max_length() {
        let processor = TextProcessor::new(Arc::new(create_test_vocabulary()), DEFAULT_VOCAB_LIMIT, 500);

        for text in ["", "!!!", "the movie", "This movie was absolutely wonderful and amazing"] {
            assert_eq!(processor.process(text).len(), 500, "text: {:?}", text);
        }

        let empty = processor.process("42 ... ?!");
        assert!(empty.iter().all(|&id| id == PAD_ID));
    }

    #[test]
    fn test_processor_truncates_long_reviews() {
        let processor = TextProcessor::new(Arc::new(create_test_vocabulary()), DEFAULT_VOCAB_LIMIT, 500);
        let review = vec!["movie"; 500]
            .into_iter()
            .chain(vec!["amazing"; 100])
            .collect::<Vec<_>>()
            .join(" ");

        assert_eq!(processor.normalize(&review).len(), 600);

        let vector = processor.process(&review);
        assert_eq!(vector.len(), 500);
        assert!(vector.iter().all(|&id| id == 20));
    }
}
