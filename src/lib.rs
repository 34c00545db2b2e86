//! Transaction Fraud Screening Service
//!
//! Encodes a single transaction submission into the feature vector a
//! pre-trained classifier expects, runs ONNX inference, and presents a
//! Fraud/Normal verdict behind a small web form.

pub mod config;
pub mod encoder;
pub mod error;
pub mod metrics;
pub mod models;
pub mod screening;
pub mod types;
pub mod web;

pub use config::AppConfig;
pub use encoder::FeatureEncoder;
pub use error::{EncodeError, InferenceError, ModelUnavailable, ScreenError};
pub use metrics::ScreeningMetrics;
pub use models::inference::InferenceEngine;
pub use screening::ScreeningService;
pub use types::{transaction::TransactionForm, verdict::ScreeningReport};
