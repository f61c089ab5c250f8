use super::mail::Mailer;
use crate::utils::fs::atomic_write;
use crate::utils::time;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Persists rendered reports under the output directory with sortable,
/// human-legible names: `<name>-<yyyy-MM-dd-HH-mm-ss>.html`. Prior runs are
/// never overwritten.
pub struct ReportWriter {
    directory: PathBuf,
    mailer: Option<Mailer>,
}

impl ReportWriter {
    pub fn new(directory: impl AsRef<Path>, mailer: Option<Mailer>) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            mailer,
        }
    }

    pub fn write(&self, name: &str, html: &str, stamp: &str) -> Result<PathBuf> {
        let filename = format!("{}-{}.html", time::sanitize_host(name), stamp);
        let path = self.directory.join(filename);
        atomic_write(&path, html.as_bytes())?;
        Ok(path)
    }

    /// Hand the overview document to the mail transport, if one is
    /// configured. Failure is logged and swallowed.
    pub fn email_overview(&self, html: &str) {
        if let Some(mailer) = &self.mailer {
            if let Err(e) = mailer.send_html(html) {
                tracing::warn!("mail delivery failed, reports on disk are unaffected: {:#}", e);
            }
        }
    }
}
