//! Test Submission Client
//!
//! Generates sample transactions and posts them to the screening API for
//! smoke testing.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Submission structure matching the service's expected format
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Submission {
    amount: f64,
    transaction_type: String,
    merchant_category: String,
    location: String,
    device_used: String,
    hour_of_day: u8,
    day_of_week: String,
}

const TRANSACTION_TYPES: &[&str] = &["withdrawal", "deposit", "transfer", "payment"];
const MERCHANT_CATEGORIES: &[&str] = &[
    "utilities",
    "online",
    "other",
    "entertainment",
    "travel",
    "grocery",
    "retail",
    "restaurant",
];
const LOCATIONS: &[&str] = &[
    "Tokyo",
    "Toronto",
    "London",
    "Sydney",
    "Berlin",
    "Dubai",
    "New York",
    "Singapore",
];
const DEVICES: &[&str] = &["mobile", "atm", "pos", "web"];
const DAYS: &[&str] = &[
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Submission generator for testing
struct SubmissionGenerator {
    rng: rand::rngs::ThreadRng,
}

impl SubmissionGenerator {
    fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }

    /// Generate an ordinary daytime transaction
    fn generate_legitimate(&mut self) -> Submission {
        Submission {
            amount: self.rng.gen_range(10.0..500.0),
            transaction_type: self.random_choice(TRANSACTION_TYPES).to_string(),
            merchant_category: self.random_choice(MERCHANT_CATEGORIES).to_string(),
            location: self.random_choice(LOCATIONS).to_string(),
            device_used: self.random_choice(DEVICES).to_string(),
            hour_of_day: self.rng.gen_range(8..20),
            day_of_week: self.random_choice(DAYS).to_string(),
        }
    }

    /// Generate a suspicious-looking transaction
    fn generate_suspicious(&mut self) -> Submission {
        Submission {
            amount: self.rng.gen_range(2000.0..10000.0), // High amount
            transaction_type: "transfer".to_string(),
            merchant_category: self.random_choice(&["online", "other"]).to_string(),
            location: self.random_choice(LOCATIONS).to_string(),
            device_used: "web".to_string(),
            hour_of_day: self.rng.gen_range(0..6), // Night time
            day_of_week: self.random_choice(DAYS).to_string(),
        }
    }

    fn random_choice<'a>(&mut self, choices: &[&'a str]) -> &'a str {
        choices[self.rng.gen_range(0..choices.len())]
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("test_client=info".parse()?),
        )
        .init();

    info!("Starting Test Submission Client");

    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let base_url = args
        .get(1)
        .map(|s| s.as_str())
        .unwrap_or("http://localhost:8080");
    let count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(20);
    let fraud_rate: f64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(0.2);
    let delay_ms: u64 = args.get(4).and_then(|s| s.parse().ok()).unwrap_or(200);

    info!(
        base_url = %base_url,
        count = count,
        fraud_rate = fraud_rate,
        delay_ms = delay_ms,
        "Configuration loaded"
    );

    let client = reqwest::Client::new();
    let endpoint = format!("{}/api/screen", base_url);

    // Probe the service; fall back to dry-run mode when unreachable
    match client
        .get(format!("{}/api/health", base_url))
        .send()
        .await
    {
        Ok(_) => info!("Connected to screening service"),
        Err(e) => {
            warn!(error = %e, "Service unreachable. Running in dry-run mode.");
            return run_dry_mode(count, fraud_rate, delay_ms).await;
        }
    }

    let mut generator = SubmissionGenerator::new();
    let mut rng = rand::thread_rng();

    info!("Posting {} submissions...", count);

    let mut fraud_verdicts = 0;
    let mut normal_verdicts = 0;

    for i in 0..count {
        let submission = if rng.gen_bool(fraud_rate) {
            generator.generate_suspicious()
        } else {
            generator.generate_legitimate()
        };

        let response = client.post(&endpoint).json(&submission).send().await?;
        let status = response.status();
        let body: serde_json::Value = response.json().await?;

        if status.is_success() {
            match body.get("verdict").and_then(|v| v.as_str()) {
                Some("fraud") => fraud_verdicts += 1,
                _ => normal_verdicts += 1,
            }
        } else {
            warn!(status = %status, body = %body, "Screening request rejected");
        }

        if (i + 1) % 10 == 0 {
            info!(
                "Posted {}/{} submissions ({} normal, {} fraud)",
                i + 1,
                count,
                normal_verdicts,
                fraud_verdicts
            );
        }

        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    info!(
        "Completed! {} submissions ({} normal, {} fraud verdicts)",
        count, normal_verdicts, fraud_verdicts
    );

    Ok(())
}

async fn run_dry_mode(count: u64, fraud_rate: f64, delay_ms: u64) -> anyhow::Result<()> {
    info!("Running in dry-run mode (no service connection)");

    let mut generator = SubmissionGenerator::new();
    let mut rng = rand::thread_rng();

    for i in 0..count {
        let submission = if rng.gen_bool(fraud_rate) {
            generator.generate_suspicious()
        } else {
            generator.generate_legitimate()
        };

        let json = serde_json::to_string_pretty(&submission)?;

        if (i + 1) % 10 == 0 || i == 0 {
            info!("Sample submission {}:\n{}", i + 1, json);
        }

        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    Ok(())
}
