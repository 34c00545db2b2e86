//! Feature encoding for fraud screening model inference.
//!
//! This module transforms raw submissions into the feature vector
//! expected by the classifier, matching the preprocessing done in the
//! Python training pipeline.

use crate::error::EncodeError;
use crate::types::transaction::{Transaction, TransactionForm};

/// Number of features the classifier was trained on.
pub const FEATURE_COUNT: usize = 8;

/// True for the late-night window; hours 6 and 22 themselves are day.
pub fn is_night(hour_of_day: u8) -> bool {
    hour_of_day < 6 || hour_of_day > 22
}

/// Encoder that transforms submissions into model input features.
///
/// Categorical fields are substituted with their training-time codes and
/// the night flag is derived from the transaction hour. Features are
/// emitted in the exact order expected by the model.
pub struct FeatureEncoder;

impl FeatureEncoder {
    /// Create a new feature encoder.
    pub fn new() -> Self {
        Self
    }

    /// Encode a raw submission into the fixed-order feature vector.
    ///
    /// Fails closed: any categorical value outside its domain is rejected
    /// here, before the classifier is ever invoked.
    pub fn encode(&self, form: &TransactionForm) -> Result<Vec<f32>, EncodeError> {
        let tx = Transaction::parse(form)?;
        Ok(self.encode_transaction(&tx))
    }

    /// Encode an already-validated transaction.
    pub fn encode_transaction(&self, tx: &Transaction) -> Vec<f32> {
        let mut features = Vec::with_capacity(FEATURE_COUNT);

        features.push(tx.amount as f32);
        features.push(tx.transaction_type.code() as f32);
        features.push(tx.merchant_category.code() as f32);
        features.push(tx.location.code() as f32);
        features.push(tx.device_used.code() as f32);
        features.push(tx.hour_of_day as f32);
        features.push(tx.day_of_week.code() as f32);
        features.push(if is_night(tx.hour_of_day) { 1.0 } else { 0.0 });

        features
    }

    /// Get the number of features produced.
    pub fn feature_count(&self) -> usize {
        FEATURE_COUNT
    }

    /// Get feature names in training order.
    pub fn feature_names(&self) -> Vec<&'static str> {
        vec![
            "amount",
            "transaction_type",
            "merchant_category",
            "location",
            "device_used",
            "hour_of_day",
            "day_of_week",
            "is_night_transaction",
        ]
    }
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(
        amount: f64,
        transaction_type: &str,
        merchant_category: &str,
        location: &str,
        device_used: &str,
        hour_of_day: u8,
        day_of_week: &str,
    ) -> TransactionForm {
        TransactionForm {
            amount,
            transaction_type: transaction_type.to_string(),
            merchant_category: merchant_category.to_string(),
            location: location.to_string(),
            device_used: device_used.to_string(),
            hour_of_day,
            day_of_week: day_of_week.to_string(),
        }
    }

    #[test]
    fn test_night_window_boundaries() {
        for hour in 0..=5 {
            assert!(is_night(hour), "hour {} should be night", hour);
        }
        for hour in 6..=22 {
            assert!(!is_night(hour), "hour {} should be day", hour);
        }
        assert!(is_night(23));
    }

    #[test]
    fn test_known_scenario_vector() {
        let encoder = FeatureEncoder::new();
        let form = form(100.0, "payment", "online", "Tokyo", "mobile", 14, "monday");

        let features = encoder.encode(&form).unwrap();

        assert_eq!(features, vec![100.0, 3.0, 1.0, 0.0, 0.0, 14.0, 0.0, 0.0]);
    }

    #[test]
    fn test_night_flag_set_for_early_hours() {
        let encoder = FeatureEncoder::new();
        let form = form(50.0, "withdrawal", "other", "Berlin", "atm", 2, "friday");

        let features = encoder.encode(&form).unwrap();

        assert_eq!(features[5], 2.0);
        assert_eq!(features[7], 1.0);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let encoder = FeatureEncoder::new();
        let form = form(75.5, "transfer", "grocery", "Dubai", "pos", 9, "wednesday");

        let first = encoder.encode(&form).unwrap();
        let second = encoder.encode(&form).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_vector_length_and_names_agree() {
        let encoder = FeatureEncoder::new();
        let form = form(10.0, "deposit", "retail", "London", "web", 12, "sunday");

        let features = encoder.encode(&form).unwrap();

        assert_eq!(features.len(), encoder.feature_count());
        assert_eq!(encoder.feature_names().len(), FEATURE_COUNT);
    }

    #[test]
    fn test_unknown_category_never_encodes() {
        let encoder = FeatureEncoder::new();
        let form = form(100.0, "loan", "online", "Tokyo", "mobile", 14, "monday");

        let err = encoder.encode(&form).unwrap_err();

        assert_eq!(
            err,
            EncodeError::UnknownCategory {
                field: "transaction_type",
                value: "loan".to_string(),
            }
        );
    }
}
