use crate::core::models::{enabled_text, StatusRecord, MAX_DEFINITION_AGE_DAYS, MAX_SCAN_AGE_DAYS};
use crate::utils::time;
use chrono::{DateTime, Duration, Utc};

/// Renders status records into self-contained HTML documents. Pure with
/// respect to its input: the render time is injected, so the same records
/// and timestamp always produce the same bytes. No I/O happens here.
pub struct HtmlReport;

impl HtmlReport {
    /// Multi-host overview: one row per record.
    pub fn overview(records: &[StatusRecord], generated_at: DateTime<Utc>) -> String {
        let mut rows = String::new();
        for record in records {
            rows.push_str(&format!(
                r#"            <tr{class}>
                <td>{host}</td>
                <td>{agent}</td>
                <td>{realtime}</td>
                <td>{age}</td>
                <td>{scan}</td>
                <td>{threats}</td>
            </tr>
"#,
                class = class_attr(overview_row_class(record)),
                host = escape(&record.host),
                agent = enabled_text(record.agent_enabled),
                realtime = enabled_text(record.realtime_protection),
                age = record.definition_age_days,
                scan = record.last_scan_text(),
                threats = record.threats_text(),
            ));
        }

        let table = format!(
            r#"        <table>
            <thead>
            <tr>
                <th>Host</th>
                <th>Defender Enabled</th>
                <th>Real-Time Protection</th>
                <th>Definitions Age (days)</th>
                <th>Last Full Scan</th>
                <th>Threats Found</th>
            </tr>
            </thead>
            <tbody>
{rows}            </tbody>
        </table>"#
        );

        Self::document("Antivirus Status Overview", generated_at, &table)
    }

    /// Single-host view: one row per attribute, each classified on its own.
    pub fn host(record: &StatusRecord, generated_at: DateTime<Utc>) -> String {
        let rows = [
            (
                "Defender Enabled",
                enabled_text(record.agent_enabled).to_string(),
                if record.agent_enabled { "" } else { "red" },
            ),
            (
                "Real-Time Protection",
                enabled_text(record.realtime_protection).to_string(),
                if record.realtime_protection { "" } else { "red" },
            ),
            (
                "Antivirus Definitions Age",
                format!("{} days", record.definition_age_days),
                if record.definition_age_days > MAX_DEFINITION_AGE_DAYS { "orange" } else { "" },
            ),
            (
                "Last Full Scan",
                record.last_scan_text(),
                if scan_stale(record, generated_at) { "orange" } else { "" },
            ),
            (
                "Threats Found",
                record.threats_text(),
                if matches!(record.threats_found, Some(n) if n > 0) { "red" } else { "" },
            ),
        ];

        let mut body = String::new();
        for (label, value, class) in rows {
            body.push_str(&format!(
                r#"            <tr{class}>
                <th>{label}</th>
                <td>{value}</td>
            </tr>
"#,
                class = class_attr(class),
            ));
        }

        let table = format!(
            r#"        <table>
            <tbody>
{body}            </tbody>
        </table>"#
        );

        let title = format!("Antivirus Status - {}", escape(&record.host));
        Self::document(&title, generated_at, &table)
    }

    fn document(title: &str, generated_at: DateTime<Utc>, body: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
        {css}
    </style>
</head>
<body>
    <div class="container">
        <h1>{title}</h1>
        <div class="generated">Generated: {generated}</div>
{body}
    </div>
</body>
</html>"#,
            title = title,
            css = Self::get_css(),
            generated = time::display_time(generated_at),
            body = body,
        )
    }

    fn get_css() -> &'static str {
        r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
            background: #f4f5f7;
            color: #24292f;
            line-height: 1.6;
        }
        .container { max-width: 1000px; margin: 0 auto; padding: 30px 20px; }
        h1 { font-size: 1.8em; margin-bottom: 5px; }
        .generated { color: #57606a; margin-bottom: 25px; }
        table {
            width: 100%;
            border-collapse: collapse;
            background: white;
            box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
        }
        th, td {
            padding: 10px 14px;
            text-align: left;
            border-bottom: 1px solid #d8dee4;
        }
        thead th { background: #24292f; color: white; }
        tbody th { font-weight: 600; width: 40%; }
        tr.red td, tr.red th { background: #ffd7d5; }
        tr.orange td, tr.orange th { background: #ffe9c2; }
        "#
    }
}

/// Overview row policy: a threat hit outranks outdated definitions.
fn overview_row_class(record: &StatusRecord) -> &'static str {
    if matches!(record.threats_found, Some(n) if n > 0) {
        "red"
    } else if record.definition_age_days > MAX_DEFINITION_AGE_DAYS {
        "orange"
    } else {
        ""
    }
}

fn scan_stale(record: &StatusRecord, now: DateTime<Utc>) -> bool {
    match record.last_full_scan {
        None => true,
        Some(at) => now - at > Duration::days(MAX_SCAN_AGE_DAYS),
    }
}

fn class_attr(class: &str) -> String {
    if class.is_empty() {
        String::new()
    } else {
        format!(r#" class="{}""#, class)
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
