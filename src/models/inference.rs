//! Classifier inference for the fraud screening service

use crate::config::AppConfig;
use crate::encoder::FEATURE_COUNT;
use crate::error::{InferenceError, ModelUnavailable};
use crate::models::loader::{LoadedModel, ModelLoader};
use crate::types::verdict::{Prediction, Verdict};
use ort::memory::Allocator;
use ort::value::{DowncastableTarget, DynMapValueType, DynSequenceValueType};
use std::sync::RwLock;
use tracing::{debug, warn};

/// Inference engine holding the one classifier session for the process
/// lifetime.
///
/// The session requires `&mut` to run, so it sits behind an `RwLock`; the
/// engine itself is shared read-only via `Arc` and never reloaded per
/// request.
pub struct InferenceEngine {
    /// Loaded classifier (wrapped in RwLock for interior mutability)
    model: RwLock<LoadedModel>,
    /// Feature count the model was trained on
    expected_features: usize,
}

impl InferenceEngine {
    /// Create a new inference engine from configuration.
    pub fn new(config: &AppConfig) -> Result<Self, ModelUnavailable> {
        let loader = ModelLoader::with_threads(config.model.onnx_threads)?;
        let model = loader.load(&config.model.path)?;

        Ok(Self {
            model: RwLock::new(model),
            expected_features: FEATURE_COUNT,
        })
    }

    /// Create an inference engine from an explicit artifact path.
    pub fn from_path(path: &str) -> Result<Self, ModelUnavailable> {
        let loader = ModelLoader::new()?;
        let model = loader.load(path)?;

        Ok(Self {
            model: RwLock::new(model),
            expected_features: FEATURE_COUNT,
        })
    }

    /// Number of features the model expects.
    pub fn expected_features(&self) -> usize {
        self.expected_features
    }

    /// Run the classifier on an encoded feature vector.
    ///
    /// A failed invocation is retried once before the error surfaces; the
    /// caller reports the failure to the submitter and keeps serving.
    pub fn predict(&self, features: &[f32]) -> Result<Prediction, InferenceError> {
        if features.len() != self.expected_features {
            return Err(InferenceError::ShapeMismatch {
                expected: self.expected_features,
                actual: features.len(),
            });
        }

        let mut model = self
            .model
            .write()
            .map_err(|_| InferenceError::LockPoisoned)?;

        match self.run_once(&mut model, features) {
            Ok(prediction) => Ok(prediction),
            Err(e) => {
                warn!(error = %e, "Classifier invocation failed, retrying once");
                self.run_once(&mut model, features)
            }
        }
    }

    /// Run a single classifier invocation.
    fn run_once(
        &self,
        model: &mut LoadedModel,
        features: &[f32],
    ) -> Result<Prediction, InferenceError> {
        use ort::value::Tensor;

        // Input tensor shape [1, num_features]
        let shape = vec![1_i64, features.len() as i64];
        let input_tensor = Tensor::from_array((shape, features.to_vec()))?;

        let outputs = model
            .session
            .run(ort::inputs![&model.input_name => input_tensor])?;

        let probability = self
            .extract_fraud_probability(&outputs, &model.proba_output)
            .map(|p| p.clamp(0.0, 1.0));

        let label = match self.extract_label(&outputs, &model.label_output) {
            Some(label) => label,
            // Fall back to thresholding the probability when the export
            // carries no label tensor
            None => match probability {
                Some(p) => i64::from(p >= 0.5),
                None => return Err(InferenceError::MissingLabel),
            },
        };

        if probability.is_none() {
            warn!("Classifier exposed no decodable probability output");
        }

        debug!(label, probability = ?probability, "Classifier invocation complete");

        Ok(Prediction {
            verdict: Verdict::from_class_label(label),
            probability,
        })
    }

    /// Extract the predicted class label from model outputs.
    fn extract_label(
        &self,
        outputs: &ort::session::SessionOutputs,
        label_output: &str,
    ) -> Option<i64> {
        if let Some(output) = outputs.get(label_output) {
            if let Ok(tensor) = output.try_extract_tensor::<i64>() {
                let (_, data) = tensor;
                if let Some(&label) = data.first() {
                    return Some(label);
                }
            }
        }

        // Fallback: any output that looks like a label tensor
        for (name, output) in outputs.iter() {
            if !name.contains("label") {
                continue;
            }
            if let Ok(tensor) = output.try_extract_tensor::<i64>() {
                let (_, data) = tensor;
                if let Some(&label) = data.first() {
                    return Some(label);
                }
            }
        }

        None
    }

    /// Extract the fraud-class probability from model outputs.
    ///
    /// Handles both plain tensor outputs and the seq(map(int64, float))
    /// format sklearn's ZipMap node produces.
    fn extract_fraud_probability(
        &self,
        outputs: &ort::session::SessionOutputs,
        proba_output: &str,
    ) -> Option<f64> {
        if let Some(output) = outputs.get(proba_output) {
            let dtype = output.dtype();

            if let Ok(tensor) = output.try_extract_tensor::<f32>() {
                let (shape, data) = tensor;
                return Some(self.fraud_prob_from_tensor(&shape, data));
            }

            if DynSequenceValueType::can_downcast(&dtype) {
                if let Ok(prob) = self.extract_from_sequence_map(output) {
                    return Some(prob);
                }
            }
        }

        // Fallback: iterate all outputs, skipping the label
        for (name, output) in outputs.iter() {
            if name.contains("label") {
                continue;
            }

            let dtype = output.dtype();

            if let Ok(tensor) = output.try_extract_tensor::<f32>() {
                let (shape, data) = tensor;
                return Some(self.fraud_prob_from_tensor(&shape, data));
            }

            if DynSequenceValueType::can_downcast(&dtype) {
                if let Ok(prob) = self.extract_from_sequence_map(&output) {
                    return Some(prob);
                }
            }
        }

        warn!("Could not extract fraud probability from model outputs");
        None
    }

    /// Extract the fraud-class probability from seq(map(int64, float)).
    fn extract_from_sequence_map(
        &self,
        output: &ort::value::DynValue,
    ) -> Result<f64, InferenceError> {
        let allocator = Allocator::default();

        let sequence = output.downcast_ref::<DynSequenceValueType>()?;

        let maps = sequence.try_extract_sequence::<DynMapValueType>(&allocator)?;

        if maps.is_empty() {
            return Err(InferenceError::MissingProbability);
        }

        // Batch size is always 1; the first map carries class -> prob
        let map_value = &maps[0];
        let kv_pairs = map_value.try_extract_key_values::<i64, f32>()?;

        for (class_id, prob) in &kv_pairs {
            if *class_id == 1 {
                return Ok(*prob as f64);
            }
        }

        // Two-class model missing class 1: invert class 0
        for (class_id, prob) in &kv_pairs {
            if *class_id == 0 {
                return Ok(1.0 - *prob as f64);
            }
        }

        Err(InferenceError::MissingProbability)
    }

    /// Extract the fraud probability from tensor data.
    fn fraud_prob_from_tensor(&self, shape: &ort::tensor::Shape, data: &[f32]) -> f64 {
        let dims: Vec<i64> = shape.iter().copied().collect();

        if dims.len() == 2 {
            let num_classes = dims[1] as usize;
            if num_classes >= 2 {
                // [batch, num_classes] - fraud class is index 1
                return data[1] as f64;
            } else if num_classes == 1 {
                return data[0] as f64;
            }
        } else if dims.len() == 1 {
            let num_classes = dims[0] as usize;
            if num_classes >= 2 {
                return data[1] as f64;
            } else if num_classes == 1 {
                return data[0] as f64;
            }
        }

        data.last().map(|&v| v as f64).unwrap_or(0.5)
    }
}
