use std::time::Duration;

use lettre::{Message, SmtpTransport, Transport};

use crate::{
    infra::config::EmailConfig,
    mail::{MailError, MailMessage},
};

/// Delivers an already-built message.
pub trait MailTransport {
    fn deliver(&self, email: &Message) -> Result<(), MailError>;
}

/// Plain SMTP relay, no TLS and no authentication.
pub struct SmtpMailer {
    relay: String,
    transport: SmtpTransport,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig) -> Self {
        let transport = SmtpTransport::builder_dangerous(config.host.as_str())
            .port(config.port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Self {
            relay: format!("{}:{}", config.host, config.port),
            transport,
        }
    }
}

impl MailTransport for SmtpMailer {
    fn deliver(&self, email: &Message) -> Result<(), MailError> {
        self.transport
            .send(email)
            .map(|_| ())
            .map_err(|source| MailError::Transport {
                relay: self.relay.clone(),
                source,
            })
    }
}

/// Validates `message` and hands it to `transport`.
///
/// A message without recipients fails with [`MailError::NoRecipients`]
/// before the transport is touched.
pub fn send_mail(transport: &dyn MailTransport, message: &MailMessage) -> Result<(), MailError> {
    let email = message.to_email()?;

    tracing::info!(
        recipients = message.to.len(),
        subject = %message.subject,
        "sending mail"
    );
    transport.deliver(&email)
}
