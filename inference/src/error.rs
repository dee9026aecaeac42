use thiserror::Error;

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Model loading failed: {0}")]
    ModelLoad(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Input width mismatch for {model}: expected {expected}, got {actual}")]
    ShapeMismatch {
        model: String,
        expected: usize,
        actual: usize,
    },

    #[error("Input validation failed: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, InferenceError>;
