pub mod error;
pub mod inference;
pub mod model;

pub use error::{InferenceError, Result};
pub use inference::{SentimentPredictor, NO_REVIEW_TEXT};
pub use model::{ModelEndpoint, OnnxModelEndpoint};

use review_preprocessing::{DEFAULT_MAX_LENGTH, DEFAULT_VOCAB_LIMIT, TokenId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Scores strictly above this are positive; exactly 0.5 is negative.
pub const POSITIVE_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
}

/// Verdict of a single model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub sentiment: Sentiment,
    pub confidence: f64, // probability mass behind `sentiment`, 0.5 to 1.0
    pub score: f64,      // raw model output, 0.0 (negative) to 1.0 (positive)
}

impl SentimentResult {
    pub fn from_score(score: f32) -> Self {
        let (sentiment, confidence) = if score > POSITIVE_THRESHOLD {
            (Sentiment::Positive, score)
        } else {
            (Sentiment::Negative, 1.0 - score)
        };

        Self {
            sentiment,
            confidence: f64::from(confidence),
            score: f64::from(score),
        }
    }
}

/// Both models' verdicts for one review. The models are never blended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualModelPrediction {
    pub lstm: SentimentResult,
    pub rnn: SentimentResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictorConfig {
    pub lstm_model_path: PathBuf,
    pub rnn_model_path: PathBuf,
    pub max_length: usize,
    pub vocab_limit: TokenId,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            lstm_model_path: PathBuf::from("public/models/model_lstm.onnx"),
            rnn_model_path: PathBuf::from("public/models/model_rnn.onnx"),
            max_length: DEFAULT_MAX_LENGTH,
            vocab_limit: DEFAULT_VOCAB_LIMIT,
        }
    }
}
