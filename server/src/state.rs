use crate::config::ServerConfig;
use crate::Result;
use inference::{InferenceError, SentimentPredictor};
use review_preprocessing::{fetch_word_index, Vocabulary};
use std::sync::Arc;
use std::time::Instant;

/// Immutable service context shared by every request handler.
///
/// `predictor` is `None` when startup loading failed; the server still
/// answers `/health` in that state.
#[derive(Clone)]
pub struct AppState {
    predictor: Option<Arc<SentimentPredictor>>,
    start_time: Instant,
}

impl AppState {
    pub fn new(predictor: Option<SentimentPredictor>) -> Self {
        Self {
            predictor: predictor.map(Arc::new),
            start_time: Instant::now(),
        }
    }

    /// Loads the vocabulary and both models, logging instead of failing so
    /// the health endpoint can report the outcome.
    pub async fn initialize(config: &ServerConfig) -> Self {
        match load_predictor(config).await {
            Ok(predictor) => Self::new(Some(predictor)),
            Err(e) => {
                tracing::error!("Error loading models: {}", e);
                Self::new(None)
            }
        }
    }

    pub fn predictor(&self) -> Option<&Arc<SentimentPredictor>> {
        self.predictor.as_ref()
    }

    pub fn models_loaded(&self) -> bool {
        self.predictor.is_some()
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

pub async fn load_vocabulary(config: &ServerConfig) -> Result<Vocabulary> {
    let vocabulary = match &config.word_index_url {
        Some(url) => fetch_word_index(url, &config.word_index_path).await?,
        None => Vocabulary::from_file(&config.word_index_path)?,
    };
    Ok(vocabulary)
}

pub async fn load_predictor(config: &ServerConfig) -> Result<SentimentPredictor> {
    let vocabulary = Arc::new(load_vocabulary(config).await?);
    let predictor_config = config.predictor_config();

    let predictor = tokio::task::spawn_blocking(move || SentimentPredictor::load(&predictor_config, vocabulary))
        .await
        .map_err(|e| InferenceError::ModelLoad(format!("Model loading task failed: {}", e)))??;

    Ok(predictor)
}
