//! Terminal rendering for PactLens command results.
//!
//! Every subcommand ends by pushing its outcome through an
//! [`OutputFormatter`], so `--json` switches the whole binary between
//! human-readable lines and machine-readable objects in one place.

use pactlens_notify::{NotificationCenter, NotificationKind};

/// How command results are rendered on the terminal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Sink for command results, selected once per invocation by `--json`
pub trait OutputFormatter {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn warn(&self, message: &str);
    fn info(&self, message: &str);
    fn print_json(&self, value: &serde_json::Value);
}

/// Plain-text formatter: checkmarks on stdout, errors and warnings on stderr
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn success(&self, message: &str) {
        println!("\u{2713} {}", message);
    }
    fn error(&self, message: &str) {
        eprintln!("\u{2717} Error: {}", message);
    }
    fn warn(&self, message: &str) {
        eprintln!("\u{26a0} Warning: {}", message);
    }
    fn info(&self, message: &str) {
        println!("  {}", message);
    }
    fn print_json(&self, _value: &serde_json::Value) {
        // human mode renders structured data through the message channels
    }
}

/// Line-delimited JSON formatter for scripting against the CLI
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn success(&self, message: &str) {
        println!(
            "{}",
            serde_json::json!({"success": true, "message": message})
        );
    }
    fn error(&self, message: &str) {
        eprintln!(
            "{}",
            serde_json::json!({"success": false, "error": message})
        );
    }
    fn warn(&self, message: &str) {
        eprintln!(
            "{}",
            serde_json::json!({"level": "warning", "message": message})
        );
    }
    fn info(&self, _message: &str) {}
    fn print_json(&self, value: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string_pretty(value).unwrap_or_default()
        );
    }
}

/// Picks the formatter matching the `--json` flag
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(HumanFormatter)
    }
}

/// Prints every notification currently queued in the center, mapped to the
/// formatter's severity channels
pub fn render_notifications(fmt: &dyn OutputFormatter, center: &NotificationCenter) {
    for notification in center.active() {
        match notification.kind {
            NotificationKind::Success => fmt.success(&notification.message),
            NotificationKind::Error => fmt.error(&notification.message),
            NotificationKind::Warning => fmt.warn(&notification.message),
            NotificationKind::Info => fmt.info(&notification.message),
        }
    }
}
