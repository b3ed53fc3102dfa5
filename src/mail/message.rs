use lettre::{
    message::{
        header::{ContentType, Header, HeaderName, HeaderValue},
        Mailbox,
    },
    Message,
};

use crate::mail::MailError;

/// Value of the `X-Priority` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    High,
    #[default]
    Normal,
}

impl Priority {
    pub fn header_value(self) -> u8 {
        match self {
            Self::High => 1,
            Self::Normal => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct XPriority(u8);

impl Header for XPriority {
    fn name() -> HeaderName {
        HeaderName::new_from_ascii_str("X-Priority")
    }

    fn parse(s: &str) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Self(s.trim().parse()?))
    }

    fn display(&self) -> HeaderValue {
        HeaderValue::new(Self::name(), self.0.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
    pub priority: Priority,
}

impl MailMessage {
    pub fn new(
        from: impl Into<String>,
        to: Vec<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to,
            subject: subject.into(),
            body: body.into(),
            priority: Priority::default(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Fails with [`MailError::NoRecipients`] when no non-blank recipient is set.
    pub fn validate(&self) -> Result<(), MailError> {
        if self.to.iter().all(|address| address.trim().is_empty()) {
            return Err(MailError::NoRecipients);
        }

        Ok(())
    }

    pub fn to_email(&self) -> Result<Message, MailError> {
        self.validate()?;

        let mut builder = Message::builder()
            .from(parse_mailbox(&self.from)?)
            .subject(self.subject.as_str())
            .header(XPriority(self.priority.header_value()))
            .header(ContentType::TEXT_PLAIN);

        for address in self.to.iter().filter(|address| !address.trim().is_empty()) {
            builder = builder.to(parse_mailbox(address)?);
        }

        builder.body(self.body.clone()).map_err(MailError::Build)
    }
}

/// Splits `"a@x.org, b@y.org"` into trimmed, non-empty addresses.
pub fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .map(str::to_owned)
        .collect()
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .trim()
        .parse()
        .map_err(|source| MailError::InvalidAddress {
            address: address.to_owned(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatted(message: &MailMessage) -> String {
        let email = message.to_email().expect("message should build");
        String::from_utf8(email.formatted()).expect("message should be utf-8")
    }

    #[test]
    fn splits_comma_separated_recipients() {
        assert_eq!(
            parse_recipients(" john@example.com, mary@example.org ,, "),
            vec!["john@example.com".to_owned(), "mary@example.org".to_owned()]
        );
    }

    #[test]
    fn empty_recipient_list_is_rejected() {
        let message = MailMessage::new("app@example.com", Vec::new(), "subject", "body");

        assert!(matches!(message.validate(), Err(MailError::NoRecipients)));
        assert!(matches!(message.to_email(), Err(MailError::NoRecipients)));
    }

    #[test]
    fn blank_recipients_count_as_none() {
        let message = MailMessage::new("app@example.com", vec!["  ".to_owned()], "s", "b");

        assert!(matches!(message.validate(), Err(MailError::NoRecipients)));
    }

    #[test]
    fn headers_carry_subject_recipients_and_priority() {
        let message = MailMessage::new(
            "app@example.com",
            vec!["ops@example.com".to_owned(), "dba@example.com".to_owned()],
            "nightly export",
            "all good",
        )
        .with_priority(Priority::High);

        let raw = formatted(&message);

        assert!(raw.contains("From: app@example.com"));
        assert!(raw.contains("To: ops@example.com, dba@example.com"));
        assert!(raw.contains("Subject: nightly export"));
        assert!(raw.contains("X-Priority: 1"));
        assert!(raw.contains("all good"));
    }

    #[test]
    fn default_priority_is_normal() {
        let message = MailMessage::new("app@example.com", vec!["ops@example.com".to_owned()], "s", "b");

        assert!(formatted(&message).contains("X-Priority: 3"));
    }

    #[test]
    fn malformed_address_is_reported() {
        let message = MailMessage::new("app@example.com", vec!["not an address".to_owned()], "s", "b");

        match message.to_email() {
            Err(MailError::InvalidAddress { address, .. }) => assert_eq!(address, "not an address"),
            other => panic!("expected invalid address, got {other:?}"),
        }
    }
}
