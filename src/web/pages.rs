//! Server-rendered pages: the submission form and verdict banners.
//!
//! Select widgets are populated from the closed category tables, so
//! out-of-domain values are unrepresentable in the UI itself.

use crate::error::ScreenError;
use crate::types::transaction::{DayOfWeek, DeviceUsed, Location, MerchantCategory, TransactionType};
use crate::types::verdict::ScreeningReport;

const STYLE: &str = "\
body { font-family: sans-serif; max-width: 640px; margin: 2em auto; color: #222; }\
label { display: block; margin-top: 0.8em; font-weight: bold; }\
input, select { width: 100%; padding: 0.4em; margin-top: 0.2em; }\
button { margin-top: 1.2em; padding: 0.6em 1.4em; }\
.banner { padding: 1em; margin-bottom: 1.5em; border-radius: 4px; }\
.banner.normal { background: #e6f6e6; border: 1px solid #2e7d32; }\
.banner.fraud { background: #fdecea; border: 1px solid #c62828; }\
.banner.error { background: #fff4e5; border: 1px solid #e65100; }\
.meta { color: #777; font-size: 0.85em; }";

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn options(labels: &[&str]) -> String {
    labels
        .iter()
        .map(|label| format!("<option value=\"{0}\">{0}</option>", escape(label)))
        .collect()
}

fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Transaction Fraud Screening</title>\n<style>{STYLE}</style>\n\
         </head>\n<body>\n{body}\n</body>\n</html>"
    )
}

fn form_body() -> String {
    let transaction_types: Vec<&str> = TransactionType::ALL.iter().map(|v| v.label()).collect();
    let merchant_categories: Vec<&str> = MerchantCategory::ALL.iter().map(|v| v.label()).collect();
    let locations: Vec<&str> = Location::ALL.iter().map(|v| v.label()).collect();
    let devices: Vec<&str> = DeviceUsed::ALL.iter().map(|v| v.label()).collect();
    let days: Vec<&str> = DayOfWeek::ALL.iter().map(|v| v.label()).collect();

    format!(
        "<h1>Transaction Fraud Screening</h1>\n\
         <form method=\"post\" action=\"/screen\">\n\
         <label>Amount (USD)</label>\n\
         <input type=\"number\" name=\"amount\" min=\"0\" step=\"0.01\" value=\"0\" required>\n\
         <label>Transaction type</label>\n\
         <select name=\"transaction_type\">{}</select>\n\
         <label>Merchant category</label>\n\
         <select name=\"merchant_category\">{}</select>\n\
         <label>Location</label>\n\
         <select name=\"location\">{}</select>\n\
         <label>Device</label>\n\
         <select name=\"device_used\">{}</select>\n\
         <label>Hour of day (0-23)</label>\n\
         <input type=\"number\" name=\"hour_of_day\" min=\"0\" max=\"23\" value=\"12\" required>\n\
         <label>Day of week</label>\n\
         <select name=\"day_of_week\">{}</select>\n\
         <button type=\"submit\">Screen transaction</button>\n\
         </form>",
        options(&transaction_types),
        options(&merchant_categories),
        options(&locations),
        options(&devices),
        options(&days),
    )
}

/// Render the submission form.
pub fn render_form() -> String {
    page(&form_body())
}

/// Render the verdict banner above a fresh form.
pub fn render_result(report: &ScreeningReport) -> String {
    let probability = report
        .fraud_probability
        .map(|p| format!(" (fraud probability {:.1}%)", p * 100.0))
        .unwrap_or_default();

    let banner = if report.verdict.is_fraud() {
        format!(
            "<div class=\"banner fraud\"><strong>&#9888; Flagged as fraud</strong>{}</div>",
            probability
        )
    } else {
        format!(
            "<div class=\"banner normal\"><strong>&#10003; Transaction looks normal</strong>{}</div>",
            probability
        )
    };

    let meta = format!(
        "<p class=\"meta\">Request {} &middot; {}</p>",
        escape(&report.request_id),
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );

    page(&format!("{banner}{meta}{}", form_body()))
}

/// Render an error banner above a fresh form.
pub fn render_error(error: &ScreenError) -> String {
    let banner = format!(
        "<div class=\"banner error\"><strong>Screening failed:</strong> {}</div>",
        escape(&error.to_string())
    );

    page(&format!("{banner}{}", form_body()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EncodeError;
    use crate::types::verdict::{Prediction, Verdict};

    #[test]
    fn test_form_lists_every_category() {
        let html = render_form();

        for ty in TransactionType::ALL {
            assert!(html.contains(ty.label()));
        }
        for loc in Location::ALL {
            assert!(html.contains(loc.label()));
        }
        assert!(html.contains("name=\"hour_of_day\""));
    }

    #[test]
    fn test_result_banner_shows_probability() {
        let report = Prediction {
            verdict: Verdict::Fraud,
            probability: Some(0.93),
        }
        .to_report();

        let html = render_result(&report);
        assert!(html.contains("Flagged as fraud"));
        assert!(html.contains("93.0%"));
    }

    #[test]
    fn test_error_banner_escapes_user_input() {
        let err = ScreenError::Encode(EncodeError::UnknownCategory {
            field: "transaction_type",
            value: "<script>".to_string(),
        });

        let html = render_error(&err);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
