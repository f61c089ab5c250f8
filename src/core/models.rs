use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Definitions older than this many days are flagged as outdated.
pub const MAX_DEFINITION_AGE_DAYS: u32 = 5;
/// A full scan older than this many days counts as stale.
pub const MAX_SCAN_AGE_DAYS: i64 = 14;

/// Protection status of a single host, produced by one successful probe.
/// Immutable after creation; hosts that failed to answer contribute none.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub host: String,
    pub agent_enabled: bool,
    pub realtime_protection: bool,
    pub definition_age_days: u32,
    pub last_full_scan: Option<DateTime<Utc>>,
    /// None means no threat data was available, distinct from Some(0).
    pub threats_found: Option<u32>,
}

/// Derived highlight tier used for visual triage. Computed at render time,
/// never stored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Critical,
    Warning,
    Normal,
}

impl StatusRecord {
    pub fn severity(&self, now: DateTime<Utc>) -> Severity {
        if !self.agent_enabled
            || !self.realtime_protection
            || matches!(self.threats_found, Some(n) if n > 0)
        {
            return Severity::Critical;
        }

        let scan_stale = match self.last_full_scan {
            None => true,
            Some(at) => now - at > Duration::days(MAX_SCAN_AGE_DAYS),
        };

        if self.definition_age_days > MAX_DEFINITION_AGE_DAYS || scan_stale {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }

    pub fn last_scan_text(&self) -> String {
        match self.last_full_scan {
            Some(at) => crate::utils::time::display_time(at),
            None => "Never".to_string(),
        }
    }

    pub fn threats_text(&self) -> String {
        match self.threats_found {
            Some(n) => n.to_string(),
            None => "None".to_string(),
        }
    }
}

pub fn enabled_text(enabled: bool) -> &'static str {
    if enabled { "Enabled" } else { "Disabled" }
}
