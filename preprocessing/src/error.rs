use thiserror::Error;

#[derive(Error, Debug)]
pub enum PreprocessingError {
    #[error("Vocabulary load failed: {0}")]
    VocabularyLoad(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for PreprocessingError {
    fn from(err: reqwest::Error) -> Self {
        PreprocessingError::Network(err.to_string())
    }
}

/// Result type alias for preprocessing operations
pub type Result<T> = std::result::Result<T, PreprocessingError>;
