use crate::error::ServerError;
use crate::Result;
use inference::PredictorConfig;
use review_preprocessing::{TokenId, DEFAULT_MAX_LENGTH, DEFAULT_VOCAB_LIMIT, DEFAULT_WORD_INDEX_URL};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_length: usize,
    pub vocab_limit: TokenId,
    pub lstm_model_path: PathBuf,
    pub rnn_model_path: PathBuf,
    pub word_index_path: PathBuf,
    /// Download source used when `word_index_path` does not exist yet.
    /// `None` keeps startup offline.
    pub word_index_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_length: DEFAULT_MAX_LENGTH,
            vocab_limit: DEFAULT_VOCAB_LIMIT,
            lstm_model_path: PathBuf::from("public/models/model_lstm.onnx"),
            rnn_model_path: PathBuf::from("public/models/model_rnn.onnx"),
            word_index_path: PathBuf::from("public/models/imdb_word_index.json"),
            word_index_url: Some(DEFAULT_WORD_INDEX_URL.to_string()),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env_or_default() -> Self {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("SENTIMENT_HOST") {
            config.host = host;
        }

        if let Some(port) = parse_env("SENTIMENT_PORT") {
            config.port = port;
        }

        if let Some(max_length) = parse_env("SENTIMENT_MAX_LENGTH") {
            config.max_length = max_length;
        }

        if let Some(vocab_limit) = parse_env("SENTIMENT_VOCAB_LIMIT") {
            config.vocab_limit = vocab_limit;
        }

        if let Ok(path) = std::env::var("SENTIMENT_LSTM_MODEL") {
            config.lstm_model_path = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var("SENTIMENT_RNN_MODEL") {
            config.rnn_model_path = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var("SENTIMENT_WORD_INDEX") {
            config.word_index_path = PathBuf::from(path);
        }

        // An empty URL disables downloading.
        if let Ok(url) = std::env::var("SENTIMENT_WORD_INDEX_URL") {
            config.word_index_url = if url.trim().is_empty() { None } else { Some(url) };
        }

        config
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn predictor_config(&self) -> PredictorConfig {
        PredictorConfig {
            lstm_model_path: self.lstm_model_path.clone(),
            rnn_model_path: self.rnn_model_path.clone(),
            max_length: self.max_length,
            vocab_limit: self.vocab_limit,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(ServerError::Config("Host cannot be empty".to_string()));
        }

        if self.port == 0 {
            return Err(ServerError::Config("Port cannot be zero".to_string()));
        }

        if self.max_length == 0 {
            return Err(ServerError::Config(
                "Max sequence length must be greater than zero".to_string(),
            ));
        }

        if self.vocab_limit == 0 {
            return Err(ServerError::Config(
                "Vocabulary limit must be greater than zero".to_string(),
            ));
        }

        for (label, path) in [
            ("LSTM model path", &self.lstm_model_path),
            ("RNN model path", &self.rnn_model_path),
            ("Word index path", &self.word_index_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ServerError::Config(format!("{} cannot be empty", label)));
            }
        }

        Ok(())
    }
}

fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}={:?}, using default", key, raw);
            None
        }
    }
}
