//! The encode -> predict -> present composition.

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use crate::encoder::FeatureEncoder;
use crate::error::ScreenError;
use crate::metrics::ScreeningMetrics;
use crate::models::inference::InferenceEngine;
use crate::types::transaction::TransactionForm;
use crate::types::verdict::ScreeningReport;

/// Screens one submission at a time against the loaded classifier.
///
/// Stateless across requests: every submission is encoded, classified and
/// presented independently, and nothing is persisted.
pub struct ScreeningService {
    encoder: FeatureEncoder,
    engine: Arc<InferenceEngine>,
    metrics: Arc<ScreeningMetrics>,
}

impl ScreeningService {
    /// Create a new screening service around a loaded classifier.
    pub fn new(engine: Arc<InferenceEngine>, metrics: Arc<ScreeningMetrics>) -> Self {
        Self {
            encoder: FeatureEncoder::new(),
            engine,
            metrics,
        }
    }

    /// Screen a raw submission: encode, invoke the classifier, wrap the
    /// outcome in a report.
    ///
    /// Encoding rejections and inference failures are both surfaced to the
    /// caller; neither crashes the process.
    pub fn screen(&self, form: &TransactionForm) -> Result<ScreeningReport, ScreenError> {
        let start_time = Instant::now();

        let features = match self.encoder.encode(form) {
            Ok(features) => features,
            Err(e) => {
                self.metrics.record_encode_rejection();
                warn!(error = %e, "Submission rejected during encoding");
                return Err(e.into());
            }
        };

        match self.engine.predict(&features) {
            Ok(prediction) => {
                let report = prediction.to_report();
                let processing_time = start_time.elapsed();

                self.metrics.record_screening(processing_time, &prediction);

                info!(
                    request_id = %report.request_id,
                    verdict = ?report.verdict,
                    fraud_probability = ?report.fraud_probability,
                    processing_time_us = processing_time.as_micros(),
                    "Screening complete"
                );

                Ok(report)
            }
            Err(e) => {
                self.metrics.record_inference_failure();
                error!(error = %e, "Inference failed");
                Err(e.into())
            }
        }
    }
}
