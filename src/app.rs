use crate::{
    cli::args::Cli,
    config::ConfigLoader,
    core::{collector, errors::AvwatchError, hostlist, probe::{HostProbe, Probe}},
    query::command::CommandQuery,
    reporters::{html::HtmlReport, mail::Mailer, writer::ReportWriter},
    ui::printer,
    utils::{logging, time},
};
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;

pub async fn run(cli: Cli) -> Result<()> {
    let level = logging::level_from_cli(&cli);
    logging::init(level)?;

    let config = ConfigLoader::load_with_custom_path(cli.config.as_deref())?;

    let limit = cli.concurrency.unwrap_or(config.concurrency.max_probes);
    if limit == 0 {
        anyhow::bail!("concurrency limit must be greater than 0");
    }
    let output_dir = cli
        .output
        .clone()
        .unwrap_or_else(|| config.output.directory.clone());

    // Resolve mail settings up front so a misconfigured --email run fails
    // before any probing starts
    let mailer = if cli.email {
        let mail_cfg = config
            .mail
            .clone()
            .ok_or_else(|| anyhow::anyhow!("--email requested but no [mail] section is configured"))?;
        Some(Mailer::new(mail_cfg))
    } else {
        None
    };

    let hosts = hostlist::read(&cli.hosts)?;
    tracing::info!(
        "Collecting status from {} hosts with up to {} parallel probes",
        hosts.len(),
        limit
    );

    let query = Arc::new(CommandQuery::new(config.query.clone()));
    let probe: Arc<dyn Probe> = Arc::new(HostProbe::new(config.probe.clone(), query));
    let records = collector::collect(probe, &hosts, limit).await;

    if records.is_empty() {
        return Err(AvwatchError::EmptyRun.into());
    }
    if records.len() < hosts.len() {
        tracing::warn!(
            "{} of {} hosts produced no status record",
            hosts.len() - records.len(),
            hosts.len()
        );
    }

    let generated_at = Utc::now();
    let stamp = time::file_stamp(generated_at);
    let writer = ReportWriter::new(&output_dir, mailer);

    // A failed write loses that artifact only; the rest still go out
    let mut reports_written = 0usize;
    for record in &records {
        let html = HtmlReport::host(record, generated_at);
        match writer.write(&record.host, &html, &stamp) {
            Ok(path) => {
                reports_written += 1;
                tracing::debug!("wrote {}", path.display());
            }
            Err(e) => tracing::error!("failed to write report for {}: {:#}", record.host, e),
        }
    }

    let overview = HtmlReport::overview(&records, generated_at);
    match writer.write("Overview", &overview, &stamp) {
        Ok(path) => {
            reports_written += 1;
            tracing::info!("overview report: {}", path.display());
        }
        Err(e) => tracing::error!("failed to write overview report: {:#}", e),
    }

    writer.email_overview(&overview);

    printer::print_summary(&hosts, &records, reports_written, generated_at);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::StatusRecord;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};

    /// srv1 reports a clean status; every other host is unreachable.
    struct OneHealthyFleet;

    #[async_trait]
    impl Probe for OneHealthyFleet {
        async fn probe(&self, host: &str) -> Option<StatusRecord> {
            if host != "srv1" {
                return None;
            }
            let scanned = Utc.with_ymd_and_hms(2026, 5, 30, 3, 0, 0).unwrap();
            Some(StatusRecord {
                host: host.to_string(),
                agent_enabled: true,
                realtime_protection: true,
                definition_age_days: 2,
                last_full_scan: Some(scanned),
                threats_found: Some(0),
            })
        }
    }

    #[tokio::test]
    async fn test_end_to_end_partial_fleet() {
        let hosts = vec!["srv1".to_string(), "srv2".to_string()];
        let records = collector::collect(Arc::new(OneHealthyFleet), &hosts, 5).await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].host, "srv1");

        let generated_at = Utc.with_ymd_and_hms(2026, 6, 1, 8, 0, 0).unwrap();
        let overview = HtmlReport::overview(&records, generated_at);

        // Exactly one data row (plus the header row), with no highlight class
        assert_eq!(overview.matches("<tr>").count(), 2);
        assert!(!overview.contains(r#"class="red""#));
        assert!(!overview.contains(r#"class="orange""#));

        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path(), None);
        let stamp = time::file_stamp(generated_at);

        for record in &records {
            let html = HtmlReport::host(record, generated_at);
            writer.write(&record.host, &html, &stamp).unwrap();
        }
        writer.write("Overview", &overview, &stamp).unwrap();

        let mut names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "Overview-2026-06-01-08-00-00.html",
                "srv1-2026-06-01-08-00-00.html"
            ]
        );
    }

    #[tokio::test]
    async fn test_whole_fleet_dark_is_empty_run() {
        struct DarkFleet;

        #[async_trait]
        impl Probe for DarkFleet {
            async fn probe(&self, _host: &str) -> Option<StatusRecord> {
                None
            }
        }

        let hosts = vec!["srv1".to_string(), "srv2".to_string()];
        let records = collector::collect(Arc::new(DarkFleet), &hosts, 5).await;
        assert!(records.is_empty());

        // The run-level outcome for an empty collection is a distinct error
        let err = AvwatchError::EmptyRun;
        assert_eq!(err.to_string(), "no host produced a status record");
    }

    #[test]
    fn test_severity_window_matches_scan_threshold() {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 8, 0, 0).unwrap();
        let record = StatusRecord {
            host: "srv1".to_string(),
            agent_enabled: true,
            realtime_protection: true,
            definition_age_days: 0,
            last_full_scan: Some(now - Duration::days(14)),
            threats_found: Some(0),
        };
        // Exactly 14 days old is still inside the window
        assert_eq!(record.severity(now), crate::core::models::Severity::Normal);
    }
}
