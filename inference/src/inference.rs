use crate::model::{check_score, ModelEndpoint, OnnxModelEndpoint};
use crate::{DualModelPrediction, InferenceError, PredictorConfig, Result, SentimentResult};
use review_preprocessing::{shape, TokenId, TextProcessor, Vocabulary};
use std::sync::Arc;

pub const NO_REVIEW_TEXT: &str = "No review text provided";

/// Runs one review through the shared preprocessing and both models.
pub struct SentimentPredictor {
    processor: TextProcessor,
    lstm: Arc<dyn ModelEndpoint>,
    rnn: Arc<dyn ModelEndpoint>,
}

impl SentimentPredictor {
    pub fn new(processor: TextProcessor, lstm: Arc<dyn ModelEndpoint>, rnn: Arc<dyn ModelEndpoint>) -> Self {
        for endpoint in [&lstm, &rnn] {
            if endpoint.input_width() != processor.max_length() {
                tracing::warn!(
                    "{} model expects {} tokens but sequences are shaped to {}",
                    endpoint.name(),
                    endpoint.input_width(),
                    processor.max_length()
                );
            }
        }

        Self { processor, lstm, rnn }
    }

    /// Loads both ONNX models. Blocking; call from a blocking context.
    pub fn load(config: &PredictorConfig, vocabulary: Arc<Vocabulary>) -> Result<Self> {
        tracing::info!("Initializing sentiment predictor");

        let lstm = OnnxModelEndpoint::load("lstm", &config.lstm_model_path, config.max_length)?;
        let rnn = OnnxModelEndpoint::load("rnn", &config.rnn_model_path, config.max_length)?;
        let processor = TextProcessor::new(vocabulary, config.vocab_limit, config.max_length);

        tracing::info!("Models loaded successfully");
        Ok(Self::new(processor, Arc::new(lstm), Arc::new(rnn)))
    }

    pub async fn predict(&self, raw_text: &str) -> Result<DualModelPrediction> {
        if raw_text.is_empty() {
            return Err(InferenceError::InvalidInput(NO_REVIEW_TEXT.to_string()));
        }

        let tokens = self.processor.normalize(raw_text);
        tracing::debug!(
            "Review '{}' normalized to {} tokens",
            raw_text.chars().take(50).collect::<String>(),
            tokens.len()
        );

        let vector: Arc<[TokenId]> = shape(tokens, self.processor.max_length()).into();

        // Either model failing fails the whole prediction.
        let (lstm_score, rnn_score) = tokio::try_join!(
            score_blocking(Arc::clone(&self.lstm), Arc::clone(&vector)),
            score_blocking(Arc::clone(&self.rnn), Arc::clone(&vector)),
        )?;

        tracing::debug!("Scores: lstm={:.4}, rnn={:.4}", lstm_score, rnn_score);

        Ok(DualModelPrediction {
            lstm: SentimentResult::from_score(lstm_score),
            rnn: SentimentResult::from_score(rnn_score),
        })
    }
}

async fn score_blocking(endpoint: Arc<dyn ModelEndpoint>, vector: Arc<[TokenId]>) -> Result<f32> {
    let name = endpoint.name().to_string();
    tokio::task::spawn_blocking(move || {
        let score = endpoint.score(&vector)?;
        check_score(endpoint.as_ref(), score)
    })
    .await
    .map_err(|e| InferenceError::Inference(format!("{} scoring task failed: {}", name, e)))?
}
