use crate::config::types::MailConfig;
use anyhow::{Context, Result};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

/// SMTP delivery of the overview report. Configuration is handed in at
/// construction; there is no process-global mail state.
pub struct Mailer {
    cfg: MailConfig,
}

impl Mailer {
    pub fn new(cfg: MailConfig) -> Self {
        Self { cfg }
    }

    /// Single attempt over TLS. Callers treat failure as non-fatal: reports
    /// already on disk stay on disk.
    pub fn send_html(&self, html: &str) -> Result<()> {
        let message = Message::builder()
            .from(self.cfg.sender.parse().context("invalid sender address")?)
            .to(self.cfg.recipient.parse().context("invalid recipient address")?)
            .subject(self.cfg.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(html.to_string())
            .context("failed to build mail message")?;

        let transport = SmtpTransport::relay(&self.cfg.server)
            .context("failed to configure SMTP relay")?
            .port(self.cfg.port)
            .credentials(Credentials::new(
                self.cfg.username.clone(),
                self.cfg.password.clone(),
            ))
            .build();

        transport.send(&message).context("SMTP send failed")?;
        tracing::info!("overview report sent to {}", self.cfg.recipient);
        Ok(())
    }
}
