// Review text preprocessing: IMDB word index, normalization and shaping.

pub mod error;
pub mod processor;
pub mod sequence;
pub mod vocabulary;

pub use error::{PreprocessingError, Result};
pub use processor::{normalize, TextProcessor, DEFAULT_VOCAB_LIMIT};
pub use sequence::{shape, DEFAULT_MAX_LENGTH};
pub use vocabulary::{
    fetch_word_index, TokenId, Vocabulary, DEFAULT_WORD_INDEX_URL, PAD_ID, START_ID, UNK_ID,
    UNUSED_ID,
};
