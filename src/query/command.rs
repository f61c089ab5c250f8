use super::{RawProtectionStatus, StatusQuery};
use crate::config::types::QueryConfig;
use crate::executors::command::{self, CommandResult};
use anyhow::{Context, Result};
use async_trait::async_trait;

/// Queries a host by invoking the configured external command as
/// `<command> <base_args..> status|threats <host>` and parsing JSON from
/// stdout.
pub struct CommandQuery {
    cfg: QueryConfig,
}

impl CommandQuery {
    pub fn new(cfg: QueryConfig) -> Self {
        Self { cfg }
    }

    async fn invoke(&self, operation: &str, host: &str) -> Result<CommandResult> {
        let mut args: Vec<&str> = self.cfg.base_args.iter().map(String::as_str).collect();
        args.push(operation);
        args.push(host);
        let result = command::execute(&self.cfg.command, &args, self.cfg.timeout_ms).await?;
        tracing::debug!(
            "{} {} for {} completed in {}ms",
            self.cfg.command,
            operation,
            host,
            result.duration_ms
        );
        Ok(result)
    }
}

#[async_trait]
impl StatusQuery for CommandQuery {
    async fn protection_status(&self, host: &str) -> Result<RawProtectionStatus> {
        let result = self.invoke("status", host).await?;
        parse_status(&result.stdout)
    }

    async fn threats(&self, host: &str) -> Result<Option<u32>> {
        let result = self.invoke("threats", host).await?;
        parse_threats(&result.stdout)
    }
}

fn parse_status(stdout: &str) -> Result<RawProtectionStatus> {
    serde_json::from_str(stdout.trim()).context("status query returned unparseable JSON")
}

/// An empty response means "no threat data", a JSON list means its length is
/// the threat count. Zero-length lists are a real zero.
fn parse_threats(stdout: &str) -> Result<Option<u32>> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let entries: Vec<serde_json::Value> =
        serde_json::from_str(trimmed).context("threat query returned unparseable JSON")?;
    Ok(Some(entries.len() as u32))
}
