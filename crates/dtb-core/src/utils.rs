use chrono::{DateTime, Local};

// ============== Timestamp Helpers ==============

/// Local wall-clock timestamp used as the log line prefix.
pub fn log_timestamp() -> String {
    format_log_timestamp(&Local::now())
}

pub fn format_log_timestamp(ts: &DateTime<Local>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

// ============== Secrets ==============

/// Mask a credential for display. Short values are hidden entirely.
pub fn redact(secret: &str) -> String {
    const VISIBLE: usize = 4;

    let len = secret.chars().count();
    if len <= VISIBLE * 2 {
        return "*".repeat(len.max(3));
    }
    let head = secret.chars().take(VISIBLE).collect::<String>();
    format!("{head}...({len} chars)")
}
