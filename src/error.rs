//! Error taxonomy for the screening service

use thiserror::Error;

/// A raw submission could not be encoded into the model's feature vector.
///
/// Always raised before the classifier is invoked; the submitter is
/// expected to correct the input and retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodeError {
    #[error("unknown {field} value: {value:?}")]
    UnknownCategory { field: &'static str, value: String },

    #[error("hour_of_day must be within 0..=23, got {0}")]
    HourOutOfRange(u8),

    #[error("amount must be a non-negative finite number, got {0}")]
    InvalidAmount(f64),
}

/// The classifier artifact could not be loaded at startup.
///
/// Fatal: the process must not accept submissions without a usable model.
#[derive(Error, Debug)]
pub enum ModelUnavailable {
    #[error("classifier artifact not found at {path}")]
    NotFound { path: String },

    #[error("failed to load classifier artifact: {0}")]
    Load(#[from] ort::Error),
}

/// A classifier invocation failed at request time.
///
/// Recovered per request; the process keeps serving.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("input shape mismatch: model expects {expected} features, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("classifier session error: {0}")]
    Session(#[from] ort::Error),

    #[error("classifier produced no decodable class label")]
    MissingLabel,

    #[error("no fraud-class probability in model output")]
    MissingProbability,

    #[error("classifier session lock poisoned")]
    LockPoisoned,
}

/// Union of the failure modes a single screening request can hit.
#[derive(Error, Debug)]
pub enum ScreenError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_error_names_field_and_value() {
        let err = EncodeError::UnknownCategory {
            field: "transaction_type",
            value: "loan".to_string(),
        };

        let message = err.to_string();
        assert!(message.contains("transaction_type"));
        assert!(message.contains("loan"));
    }

    #[test]
    fn test_screen_error_is_transparent() {
        let err = ScreenError::from(EncodeError::HourOutOfRange(24));
        assert_eq!(err.to_string(), "hour_of_day must be within 0..=23, got 24");
    }
}
