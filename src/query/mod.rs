pub mod command;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw protection status as returned by the remote query mechanism, before
/// it is folded into a StatusRecord.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawProtectionStatus {
    pub antivirus_enabled: bool,
    pub realtime_protection_enabled: bool,
    pub signature_age_days: u32,
    pub full_scan_end_time: Option<DateTime<Utc>>,
}

/// Seam to the external status-query mechanism. One implementation shells
/// out to a configured command; tests substitute stubs.
#[async_trait]
pub trait StatusQuery: Send + Sync {
    async fn protection_status(&self, host: &str) -> Result<RawProtectionStatus>;

    /// Best-effort threat count. Ok(None) means the host returned no threat
    /// data, which is not the same as zero threats.
    async fn threats(&self, host: &str) -> Result<Option<u32>>;
}
