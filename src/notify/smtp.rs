use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message as Email, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tracing::{debug, info};

use super::{Message, Notifier};
use crate::core::config::SmtpSettings;

/// Sends the summary once over an implicit-TLS SMTP relay.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpNotifier {
    pub fn new(settings: &SmtpSettings) -> Result<Self> {
        let from: Mailbox = settings
            .sender
            .parse()
            .map_err(|e| anyhow!("Invalid sender address {}: {}", settings.sender, e))?;
        let to: Mailbox = settings
            .recipient
            .parse()
            .map_err(|e| anyhow!("Invalid recipient address {}: {}", settings.recipient, e))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
            .with_context(|| format!("SMTP transport error for host: {}", settings.host))?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.sender.clone(),
                settings.password.clone(),
            ))
            .build();

        debug!(host = %settings.host, port = settings.port, "SMTP transport ready");
        Ok(Self {
            transport,
            from,
            to,
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, message: &Message) -> Result<()> {
        let email = Email::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(&message.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .context("Failed to build email")?;

        self.transport
            .send(email)
            .await
            .context("Failed to send email")?;

        info!(to = %self.to, "Summary email sent");
        Ok(())
    }

    fn name(&self) -> &str {
        "smtp"
    }
}
