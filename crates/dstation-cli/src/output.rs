//! CLI output formatting

use dstation_core::domain::DsError;

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Trait for formatting CLI output
pub trait OutputFormatter {
    fn success(&self, message: &str);
    /// Renders a domain error, with its follow-up hint where one exists
    fn fail(&self, err: &DsError);
    fn warn(&self, message: &str);
    fn info(&self, message: &str);
    fn print_json(&self, value: &serde_json::Value);
}

/// Actionable follow-up for an error, keyed off its category
fn error_hint(err: &DsError) -> Option<&'static str> {
    match err {
        DsError::NotAuthenticated => Some("Run `dstation auth login` first."),
        DsError::SessionExpired | DsError::ReloginFailed(_) => {
            Some("Run `dstation auth login` again.")
        }
        DsError::OtpRequired => Some("Retry with --otp."),
        e if e.is_connectivity_error() => Some("Check that the NAS is reachable."),
        _ => None,
    }
}

/// Human-readable output formatter with checkmarks and indentation
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn success(&self, message: &str) {
        println!("\u{2713} {}", message);
    }
    fn fail(&self, err: &DsError) {
        eprintln!("\u{2717} Error: {err}");
        if let Some(hint) = error_hint(err) {
            eprintln!("  {hint}");
        }
    }
    fn warn(&self, message: &str) {
        eprintln!("\u{26a0} Warning: {}", message);
    }
    fn info(&self, message: &str) {
        println!("  {}", message);
    }
    fn print_json(&self, _value: &serde_json::Value) {
        // Human formatter doesn't print JSON
    }
}

/// JSON output formatter
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn success(&self, message: &str) {
        println!(
            "{}",
            serde_json::json!({"success": true, "message": message})
        );
    }
    fn fail(&self, err: &DsError) {
        let mut body = serde_json::json!({"success": false, "error": err.to_string()});
        if let Some(hint) = error_hint(err) {
            body["hint"] = serde_json::Value::from(hint);
        }
        eprintln!("{body}");
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

pub fn get_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Human => Box::new(HumanFormatter),
    }
}

/// Formats a byte count for humans (binary units)
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
