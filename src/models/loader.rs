//! ONNX classifier artifact loader

use crate::error::ModelUnavailable;
use ort::session::{builder::GraphOptimizationLevel, Session};
use std::path::Path;
use tracing::info;

/// Loaded classifier with the session metadata needed at inference time.
pub struct LoadedModel {
    /// ONNX Runtime session
    pub session: Session,
    /// Input tensor name
    pub input_name: String,
    /// Output carrying the predicted class label
    pub label_output: String,
    /// Output carrying per-class probabilities
    pub proba_output: String,
}

/// Loader for the classifier artifact.
pub struct ModelLoader {
    /// Number of threads for ONNX inference
    onnx_threads: usize,
}

impl ModelLoader {
    /// Create a new model loader with default settings (1 thread)
    pub fn new() -> Result<Self, ModelUnavailable> {
        Self::with_threads(1)
    }

    /// Create a new model loader with specified number of threads
    pub fn with_threads(onnx_threads: usize) -> Result<Self, ModelUnavailable> {
        ort::init().commit()?;
        info!(onnx_threads = onnx_threads, "ONNX Runtime initialized");
        Ok(Self { onnx_threads })
    }

    /// Load the classifier from file.
    ///
    /// sklearn-style exports name their tensors `float_input`,
    /// `output_label` and `output_probability`; positional metadata is
    /// used as a fallback when the names differ.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<LoadedModel, ModelUnavailable> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ModelUnavailable::NotFound {
                path: path.display().to_string(),
            });
        }

        info!(path = %path.display(), threads = self.onnx_threads, "Loading classifier artifact");

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(self.onnx_threads)?
            .commit_from_file(path)?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "float_input".to_string());

        let label_output = session
            .outputs
            .iter()
            .find(|o| o.name.contains("label"))
            .map(|o| o.name.clone())
            .unwrap_or_else(|| {
                session
                    .outputs
                    .first()
                    .map(|o| o.name.clone())
                    .unwrap_or_else(|| "output_label".to_string())
            });

        let proba_output = session
            .outputs
            .iter()
            .find(|o| o.name.contains("prob"))
            .map(|o| o.name.clone())
            .unwrap_or_else(|| {
                session
                    .outputs
                    .last()
                    .map(|o| o.name.clone())
                    .unwrap_or_else(|| "output_probability".to_string())
            });

        info!(
            input = %input_name,
            label = %label_output,
            probabilities = %proba_output,
            "Classifier loaded successfully"
        );

        Ok(LoadedModel {
            session,
            input_name,
            label_output,
            proba_output,
        })
    }
}
