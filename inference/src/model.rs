use crate::{InferenceError, Result};
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::{Tensor, ValueType};
use review_preprocessing::TokenId;
use std::path::Path;
use std::sync::Mutex;

/// A loaded scoring function: one fixed-length token vector in, one
/// positive-class probability out.
///
/// Implementations are read-only after loading and shared across requests.
pub trait ModelEndpoint: Send + Sync {
    fn name(&self) -> &str;

    /// Vector length the model accepts.
    fn input_width(&self) -> usize;

    fn score(&self, vector: &[TokenId]) -> Result<f32>;
}

/// Sequence classifier exported to ONNX with a `[1, input_width]` float
/// input and a single sigmoid output.
pub struct OnnxModelEndpoint {
    name: String,
    // `Session::run` needs `&mut`; the lock covers one scoring call.
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
    input_width: usize,
}

impl OnnxModelEndpoint {
    /// Loads the model and takes its input width from the graph. The
    /// `configured_width` only applies when the sequence axis is dynamic.
    pub fn load(name: impl Into<String>, model_path: &Path, configured_width: usize) -> Result<Self> {
        let name = name.into();
        tracing::info!("Loading {} model from: {:?}", name, model_path);

        if !model_path.exists() {
            return Err(InferenceError::ModelLoad(format!(
                "Model file not found: {:?}",
                model_path
            )));
        }

        let session = Session::builder()
            .map_err(|e| InferenceError::ModelLoad(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError::ModelLoad(format!("Failed to set optimization level: {}", e)))?
            .with_intra_threads(1)
            .map_err(|e| InferenceError::ModelLoad(format!("Failed to set thread count: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| InferenceError::ModelLoad(format!("Failed to load model: {}", e)))?;

        let input = session
            .inputs
            .first()
            .ok_or_else(|| InferenceError::ModelLoad(format!("{} model declares no inputs", name)))?;
        let input_name = input.name.clone();
        let declared_width = match &input.input_type {
            ValueType::Tensor { shape, .. } => shape.get(1).copied(),
            _ => None,
        };
        let input_width = resolve_width(declared_width, configured_width);
        if input_width != configured_width {
            tracing::warn!(
                "{} model declares input width {}, overriding configured {}",
                name,
                input_width,
                configured_width
            );
        }

        let output_name = session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .ok_or_else(|| InferenceError::ModelLoad(format!("{} model declares no outputs", name)))?;

        tracing::info!(
            "Successfully loaded {} model (input: {}, output: {}, width: {})",
            name,
            input_name,
            output_name,
            input_width
        );

        Ok(Self {
            name,
            session: Mutex::new(session),
            input_name,
            output_name,
            input_width,
        })
    }
}

impl ModelEndpoint for OnnxModelEndpoint {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_width(&self) -> usize {
        self.input_width
    }

    fn score(&self, vector: &[TokenId]) -> Result<f32> {
        check_width(self, vector)?;

        let values: Vec<f32> = vector.iter().map(|&id| id as f32).collect();
        let input_array = ndarray::Array2::from_shape_vec((1, values.len()), values)
            .map_err(|e| InferenceError::Inference(format!("Failed to create input array: {}", e)))?;
        let input_tensor = Tensor::from_array(input_array)
            .map_err(|e| InferenceError::Inference(format!("Failed to create input tensor: {}", e)))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| InferenceError::Inference(format!("{} session lock poisoned", self.name)))?;

        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input_tensor])
            .map_err(|e| InferenceError::Inference(format!("{} inference failed: {}", self.name, e)))?;

        let (_shape, data) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::Inference(format!("Failed to extract {} output: {}", self.name, e)))?;

        let score = data
            .first()
            .copied()
            .ok_or_else(|| InferenceError::Inference(format!("{} produced an empty output", self.name)))?;

        check_score(self, score)
    }
}

/// Width declared by the graph's sequence axis, or `configured` when that
/// axis is dynamic (`-1`) or absent.
pub fn resolve_width(declared: Option<i64>, configured: usize) -> usize {
    match declared {
        Some(width) if width > 0 => width as usize,
        _ => configured,
    }
}

/// Rejects vectors whose length differs from the endpoint's input width.
pub fn check_width(endpoint: &dyn ModelEndpoint, vector: &[TokenId]) -> Result<()> {
    if vector.len() != endpoint.input_width() {
        return Err(InferenceError::ShapeMismatch {
            model: endpoint.name().to_string(),
            expected: endpoint.input_width(),
            actual: vector.len(),
        });
    }
    Ok(())
}

/// Rejects outputs that are not a probability, such as raw logits or NaN.
pub fn check_score(endpoint: &dyn ModelEndpoint, score: f32) -> Result<f32> {
    if !(0.0..=1.0).contains(&score) {
        return Err(InferenceError::Inference(format!(
            "{} produced a score outside [0, 1]: {}",
            endpoint.name(),
            score
        )));
    }
    Ok(score)
}
