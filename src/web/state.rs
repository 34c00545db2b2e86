use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::metrics::ScreeningMetrics;
use crate::screening::ScreeningService;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Screening service (classifier loaded once at startup)
    pub service: Arc<ScreeningService>,

    /// Metrics collector
    pub metrics: Arc<ScreeningMetrics>,

    /// Application start time
    pub start_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(service: Arc<ScreeningService>, metrics: Arc<ScreeningMetrics>) -> Self {
        Self {
            service,
            metrics,
            start_time: Utc::now(),
        }
    }

    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.start_time).num_seconds()
    }
}
