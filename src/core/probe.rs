use crate::config::types::ProbeConfig;
use crate::core::models::StatusRecord;
use crate::executors::command;
use crate::query::StatusQuery;
use async_trait::async_trait;
use std::sync::Arc;

/// One attempt to determine a single host's protection status. Failures are
/// contained here: the collector only ever sees Some(record) or None.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, host: &str) -> Option<StatusRecord>;
}

pub struct HostProbe {
    cfg: ProbeConfig,
    query: Arc<dyn StatusQuery>,
}

impl HostProbe {
    pub fn new(cfg: ProbeConfig, query: Arc<dyn StatusQuery>) -> Self {
        Self { cfg, query }
    }

    async fn reachable(&self, host: &str) -> bool {
        let mut args: Vec<&str> = self.cfg.base_args.iter().map(String::as_str).collect();
        args.push(host);

        for attempt in 1..=self.cfg.attempts {
            match command::execute(&self.cfg.command, &args, self.cfg.timeout_ms).await {
                Ok(_) => return true,
                Err(e) => tracing::debug!(
                    "reachability attempt {}/{} failed for {}: {:#}",
                    attempt,
                    self.cfg.attempts,
                    host,
                    e
                ),
            }
        }
        false
    }
}

#[async_trait]
impl Probe for HostProbe {
    async fn probe(&self, host: &str) -> Option<StatusRecord> {
        if !self.reachable(host).await {
            tracing::warn!("host {} is unreachable, no record collected", host);
            return None;
        }

        let raw = match self.query.protection_status(host).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("status query failed for {}: {:#}", host, e);
                return None;
            }
        };

        // Best-effort: a failed threat lookup still yields a record
        let threats_found = match self.query.threats(host).await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!("threat query failed for {}: {:#}", host, e);
                None
            }
        };

        Some(StatusRecord {
            host: host.to_string(),
            agent_enabled: raw.antivirus_enabled,
            realtime_protection: raw.realtime_protection_enabled,
            definition_age_days: raw.signature_age_days,
            last_full_scan: raw.full_scan_end_time,
            threats_found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::RawProtectionStatus;
    use anyhow::Result;

    struct FixedQuery {
        fail_status: bool,
        fail_threats: bool,
    }

    #[async_trait]
    impl StatusQuery for FixedQuery {
        async fn protection_status(&self, _host: &str) -> Result<RawProtectionStatus> {
            if self.fail_status {
                anyhow::bail!("query refused");
            }
            Ok(RawProtectionStatus {
                antivirus_enabled: true,
                realtime_protection_enabled: true,
                signature_age_days: 2,
                full_scan_end_time: None,
            })
        }

        async fn threats(&self, _host: &str) -> Result<Option<u32>> {
            if self.fail_threats {
                anyhow::bail!("threat listing unsupported");
            }
            Ok(Some(0))
        }
    }

    fn probe_cfg(command: &str) -> ProbeConfig {
        ProbeConfig {
            command: command.to_string(),
            base_args: vec![],
            attempts: 2,
            timeout_ms: 1000,
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_no_record() {
        let query = Arc::new(FixedQuery { fail_status: false, fail_threats: false });
        let probe = HostProbe::new(probe_cfg("false"), query);
        assert_eq!(probe.probe("srv1").await, None);
    }

    #[tokio::test]
    async fn test_reachable_host_yields_record() {
        let query = Arc::new(FixedQuery { fail_status: false, fail_threats: false });
        let probe = HostProbe::new(probe_cfg("true"), query);
        let record = probe.probe("srv1").await.unwrap();
        assert_eq!(record.host, "srv1");
        assert_eq!(record.threats_found, Some(0));
    }

    #[tokio::test]
    async fn test_status_failure_yields_no_record() {
        let query = Arc::new(FixedQuery { fail_status: true, fail_threats: false });
        let probe = HostProbe::new(probe_cfg("true"), query);
        assert_eq!(probe.probe("srv1").await, None);
    }

    #[tokio::test]
    async fn test_threat_failure_still_yields_record() {
        let query = Arc::new(FixedQuery { fail_status: false, fail_threats: true });
        let probe = HostProbe::new(probe_cfg("true"), query);
        let record = probe.probe("srv1").await.unwrap();
        assert_eq!(record.threats_found, None);
    }
}
