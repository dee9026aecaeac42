use crate::{PreprocessingError, Result};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Integer id fed to the sequence models.
pub type TokenId = u32;

pub const PAD_ID: TokenId = 0;
pub const START_ID: TokenId = 1;
pub const UNK_ID: TokenId = 2;
pub const UNUSED_ID: TokenId = 3;

/// Ranks in the word-frequency table are shifted past the reserved ids.
pub const INDEX_OFFSET: TokenId = 3;

pub const RESERVED_TOKENS: [(&str, TokenId); 4] = [
    ("<PAD>", PAD_ID),
    ("<START>", START_ID),
    ("<UNK>", UNK_ID),
    ("<UNUSED>", UNUSED_ID),
];

/// Location of the Keras IMDB word index the models were trained against.
pub const DEFAULT_WORD_INDEX_URL: &str =
    "https://storage.googleapis.com/tensorflow/tf-keras-datasets/imdb_word_index.json";

/// Immutable word → token id mapping, built once at startup and shared
/// read-only by every request.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    word_to_id: HashMap<String, TokenId>,
}

impl Vocabulary {
    /// Builds the vocabulary from a word → frequency-rank table.
    ///
    /// Every ingested word gets `rank + 3`; the four reserved tokens are
    /// inserted last so they always hold ids 0–3.
    pub fn build(frequency_table: HashMap<String, u32>) -> Result<Self> {
        if frequency_table.is_empty() {
            return Err(PreprocessingError::VocabularyLoad(
                "word frequency table is empty".to_string(),
            ));
        }

        let mut word_to_id = HashMap::with_capacity(frequency_table.len() + RESERVED_TOKENS.len());
        for (word, rank) in frequency_table {
            let id = rank.checked_add(INDEX_OFFSET).ok_or_else(|| {
                PreprocessingError::VocabularyLoad(format!("rank {} for '{}' overflows token id", rank, word))
            })?;
            word_to_id.insert(word, id);
        }

        for (token, id) in RESERVED_TOKENS {
            word_to_id.insert(token.to_string(), id);
        }

        Ok(Self { word_to_id })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let table: HashMap<String, u32> = serde_json::from_str(json)
            .map_err(|e| PreprocessingError::VocabularyLoad(format!("invalid word index JSON: {}", e)))?;
        Self::build(table)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::info!("Loading word index from: {:?}", path);

        let content = std::fs::read_to_string(path).map_err(|e| {
            PreprocessingError::VocabularyLoad(format!("failed to read word index {:?}: {}", path, e))
        })?;
        let vocabulary = Self::from_json_str(&content)?;

        tracing::info!("Loaded vocabulary with {} entries", vocabulary.len());
        Ok(vocabulary)
    }

    pub fn get(&self, word: &str) -> Option<TokenId> {
        self.word_to_id.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.word_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word_to_id.is_empty()
    }
}

/// Loads the word index from `cache_path`, downloading it from `url` first
/// when the cache does not exist yet.
pub async fn fetch_word_index(url: &str, cache_path: &Path) -> Result<Vocabulary> {
    if tokio::fs::try_exists(cache_path).await? {
        return Vocabulary::from_file(cache_path);
    }

    tracing::info!("Word index not cached at {:?}, downloading from {}", cache_path, url);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()?;
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    // The cache only ever holds an index that parsed.
    let vocabulary = Vocabulary::from_json_str(&body)?;

    if let Some(parent) = cache_path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(cache_path, body.as_bytes()).await?;

    tracing::info!("Cached word index ({} entries) at {:?}", vocabulary.len(), cache_path);
    Ok(vocabulary)
}
