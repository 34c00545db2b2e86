//! Screening verdict and report types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Binary classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Normal,
    Fraud,
}

impl Verdict {
    /// Map the model's class label (0 = normal, 1 = fraud) to a verdict.
    pub fn from_class_label(label: i64) -> Self {
        if label == 1 {
            Verdict::Fraud
        } else {
            Verdict::Normal
        }
    }

    pub fn is_fraud(&self) -> bool {
        matches!(self, Verdict::Fraud)
    }
}

/// Raw classifier output mapped to a user-facing result.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Binary verdict derived from the predicted class
    pub verdict: Verdict,
    /// Estimated fraud-class probability, when the model exposes one
    pub probability: Option<f64>,
}

impl Prediction {
    /// Wrap the prediction in a report for display and logging.
    pub fn to_report(&self) -> ScreeningReport {
        ScreeningReport {
            request_id: uuid::Uuid::new_v4().to_string(),
            verdict: self.verdict,
            fraud_probability: self.probability,
            timestamp: Utc::now(),
        }
    }
}

/// Result returned to the submitter; discarded once displayed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    /// Unique identifier for this screening request
    pub request_id: String,

    /// Binary verdict
    pub verdict: Verdict,

    /// Fraud-class probability in [0, 1], if available
    pub fraud_probability: Option<f64>,

    /// When the screening completed
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_from_class_label() {
        assert_eq!(Verdict::from_class_label(0), Verdict::Normal);
        assert_eq!(Verdict::from_class_label(1), Verdict::Fraud);
        assert!(Verdict::from_class_label(1).is_fraud());
        assert!(!Verdict::from_class_label(0).is_fraud());
    }

    #[test]
    fn test_report_serialization() {
        let prediction = Prediction {
            verdict: Verdict::Fraud,
            probability: Some(0.87),
        };

        let report = prediction.to_report();
        let json = serde_json::to_string(&report).unwrap();
        let deserialized: ScreeningReport = serde_json::from_str(&json).unwrap();

        assert_eq!(report.request_id, deserialized.request_id);
        assert_eq!(deserialized.verdict, Verdict::Fraud);
        assert_eq!(deserialized.fraud_probability, Some(0.87));
    }

    #[test]
    fn test_report_without_probability() {
        let prediction = Prediction {
            verdict: Verdict::Normal,
            probability: None,
        };

        let report = prediction.to_report();
        assert_eq!(report.verdict, Verdict::Normal);
        assert!(report.fraud_probability.is_none());
    }
}
