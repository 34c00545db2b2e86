//! Screening counters and latency statistics.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::info;

use crate::types::verdict::Prediction;

/// Metrics collector for the screening service
pub struct ScreeningMetrics {
    /// Total screenings completed
    pub screenings_completed: AtomicU64,
    /// Screenings that came back with a fraud verdict
    pub fraud_verdicts: AtomicU64,
    /// Submissions rejected during encoding
    pub encode_rejections: AtomicU64,
    /// Classifier invocations that failed after retry
    pub inference_failures: AtomicU64,
    /// Per-request processing times (in microseconds)
    processing_times: RwLock<Vec<u64>>,
    /// Fraud probability distribution buckets
    probability_buckets: RwLock<[u64; 10]>,
    /// Start time for rate calculation
    start_time: Instant,
}

impl ScreeningMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            screenings_completed: AtomicU64::new(0),
            fraud_verdicts: AtomicU64::new(0),
            encode_rejections: AtomicU64::new(0),
            inference_failures: AtomicU64::new(0),
            processing_times: RwLock::new(Vec::with_capacity(1000)),
            probability_buckets: RwLock::new([0; 10]),
            start_time: Instant::now(),
        }
    }

    /// Record a completed screening
    pub fn record_screening(&self, processing_time: Duration, prediction: &Prediction) {
        self.screenings_completed.fetch_add(1, Ordering::Relaxed);

        if prediction.verdict.is_fraud() {
            self.fraud_verdicts.fetch_add(1, Ordering::Relaxed);
        }

        if let Ok(mut times) = self.processing_times.write() {
            times.push(processing_time.as_micros() as u64);
            // Keep only the most recent samples for memory efficiency
            if times.len() > 10000 {
                times.drain(0..5000);
            }
        }

        if let Some(probability) = prediction.probability {
            let bucket = (probability * 10.0).min(9.0) as usize;
            if let Ok(mut buckets) = self.probability_buckets.write() {
                buckets[bucket] += 1;
            }
        }
    }

    /// Record a submission rejected during encoding
    pub fn record_encode_rejection(&self) {
        self.encode_rejections.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a classifier invocation failure
    pub fn record_inference_failure(&self) {
        self.inference_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get processing time statistics
    pub fn get_processing_stats(&self) -> ProcessingStats {
        let times = self.processing_times.read().unwrap();
        if times.is_empty() {
            return ProcessingStats::default();
        }

        let mut sorted: Vec<u64> = times.clone();
        sorted.sort();

        let sum: u64 = sorted.iter().sum();
        let count = sorted.len();

        ProcessingStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: sorted[count / 2],
            p95_us: sorted[(count as f64 * 0.95) as usize],
            p99_us: sorted[(count as f64 * 0.99) as usize],
            max_us: *sorted.last().unwrap_or(&0),
        }
    }

    /// Get current throughput (screenings per second)
    pub fn get_throughput(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.screenings_completed.load(Ordering::Relaxed) as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Get the fraud probability distribution
    pub fn get_probability_distribution(&self) -> [u64; 10] {
        *self.probability_buckets.read().unwrap()
    }

    /// Snapshot of all metrics for the JSON endpoint
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            screenings_completed: self.screenings_completed.load(Ordering::Relaxed),
            fraud_verdicts: self.fraud_verdicts.load(Ordering::Relaxed),
            encode_rejections: self.encode_rejections.load(Ordering::Relaxed),
            inference_failures: self.inference_failures.load(Ordering::Relaxed),
            throughput_per_sec: self.get_throughput(),
            latency: self.get_processing_stats(),
            probability_distribution: self.get_probability_distribution(),
        }
    }

    /// Print summary statistics
    pub fn print_summary(&self) {
        let completed = self.screenings_completed.load(Ordering::Relaxed);
        let fraud = self.fraud_verdicts.load(Ordering::Relaxed);
        let fraud_rate = if completed > 0 {
            (fraud as f64 / completed as f64) * 100.0
        } else {
            0.0
        };

        let processing = self.get_processing_stats();

        info!(
            screenings = completed,
            fraud_verdicts = fraud,
            fraud_rate = format!("{:.1}%", fraud_rate),
            encode_rejections = self.encode_rejections.load(Ordering::Relaxed),
            inference_failures = self.inference_failures.load(Ordering::Relaxed),
            "Screening metrics summary"
        );
        info!(
            mean_us = processing.mean_us,
            p50_us = processing.p50_us,
            p95_us = processing.p95_us,
            p99_us = processing.p99_us,
            "Screening latency (μs)"
        );
    }
}

impl Default for ScreeningMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Processing time statistics
#[derive(Debug, Default, Serialize)]
pub struct ProcessingStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
}

/// Snapshot of all metrics, serialized by the metrics endpoint
#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub screenings_completed: u64,
    pub fraud_verdicts: u64,
    pub encode_rejections: u64,
    pub inference_failures: u64,
    pub throughput_per_sec: f64,
    pub latency: ProcessingStats,
    pub probability_distribution: [u64; 10],
}

/// Periodic reporter that logs metric summaries
pub struct MetricsReporter {
    metrics: std::sync::Arc<ScreeningMetrics>,
    interval_secs: u64,
}

impl MetricsReporter {
    pub fn new(metrics: std::sync::Arc<ScreeningMetrics>, interval_secs: u64) -> Self {
        Self {
            metrics,
            interval_secs,
        }
    }

    /// Start the periodic reporting task
    pub async fn start(self) {
        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
        loop {
            interval.tick().await;
            self.metrics.print_summary();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::verdict::Verdict;

    #[test]
    fn test_metrics_recording() {
        let metrics = ScreeningMetrics::new();

        metrics.record_screening(
            Duration::from_micros(100),
            &Prediction {
                verdict: Verdict::Normal,
                probability: Some(0.12),
            },
        );
        metrics.record_screening(
            Duration::from_micros(200),
            &Prediction {
                verdict: Verdict::Fraud,
                probability: Some(0.91),
            },
        );
        metrics.record_encode_rejection();

        assert_eq!(metrics.screenings_completed.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.fraud_verdicts.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.encode_rejections.load(Ordering::Relaxed), 1);

        let distribution = metrics.get_probability_distribution();
        assert_eq!(distribution[1], 1);
        assert_eq!(distribution[9], 1);
    }

    #[test]
    fn test_processing_stats() {
        let metrics = ScreeningMetrics::new();

        for us in [100, 200, 300] {
            metrics.record_screening(
                Duration::from_micros(us),
                &Prediction {
                    verdict: Verdict::Normal,
                    probability: None,
                },
            );
        }

        let stats = metrics.get_processing_stats();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.mean_us, 200);
        assert_eq!(stats.max_us, 300);
    }

    #[test]
    fn test_missing_probability_skips_buckets() {
        let metrics = ScreeningMetrics::new();

        metrics.record_screening(
            Duration::from_micros(50),
            &Prediction {
                verdict: Verdict::Normal,
                probability: None,
            },
        );

        let distribution = metrics.get_probability_distribution();
        assert!(distribution.iter().all(|&count| count == 0));
    }
}
