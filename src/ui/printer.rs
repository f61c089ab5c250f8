use crate::core::models::{Severity, StatusRecord};
use chrono::{DateTime, Utc};
use colored::Colorize;

pub fn print_summary(
    hosts: &[String],
    records: &[StatusRecord],
    reports_written: usize,
    generated_at: DateTime<Utc>,
) {
    let count = |severity: Severity| {
        records
            .iter()
            .filter(|r| r.severity(generated_at) == severity)
            .count()
    };
    let critical = count(Severity::Critical);
    let warning = count(Severity::Warning);
    let normal = count(Severity::Normal);

    println!("\n{}", "═══════════════════════════════════════".green().bold());
    println!("{}", "avwatch Run Complete".green().bold());
    println!("{}", "═══════════════════════════════════════".green().bold());

    println!(
        "\n{}: {}/{}",
        "Hosts Reporting".cyan().bold(),
        records.len(),
        hosts.len()
    );
    println!("{}: {}", "Reports Written".cyan().bold(), reports_written);

    println!("\n{}", "Severity:".yellow().bold());
    println!("  Critical: {}", critical.to_string().red().bold());
    println!("  Warning:  {}", warning.to_string().yellow().bold());
    println!("  Normal:   {}", normal.to_string().green().bold());

    let missing = hosts.len() - records.len();
    if missing > 0 {
        println!(
            "\n{}",
            format!("{} hosts produced no record, see warnings above", missing).red()
        );
    }
}
