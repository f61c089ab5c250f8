use chrono::{DateTime, Utc};
use regex::Regex;

/// Sortable stamp used to suffix report filenames.
pub fn file_stamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d-%H-%M-%S").to_string()
}

/// Human-readable wall-clock form embedded in report headers.
pub fn display_time(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

pub fn sanitize_host(host: &str) -> String {
    // Replace characters that aren't safe for filenames
    let re = Regex::new(r"[^a-zA-Z0-9\-_\.]").unwrap();
    re.replace_all(host, "_").to_string()
}
