use std::error::Error;

use crate::{
    infra::config::{AppConfig, EmailConfig},
    mail::{parse_recipients, MailMessage, Priority},
};

const FAILURE_SUBJECT: &str = "EXCEPTION";

/// Message for the `notify` command; each `to` entry may hold several
/// comma-separated addresses.
pub fn outgoing_message(
    email: &EmailConfig,
    to: &[String],
    subject: &str,
    body: &str,
    urgent: bool,
) -> MailMessage {
    let recipients = to.iter().flat_map(|raw| parse_recipients(raw)).collect();
    let priority = if urgent { Priority::High } else { Priority::Normal };

    MailMessage::new(email.sender.as_str(), recipients, subject, body).with_priority(priority)
}

/// High-priority report of a failed run, sent from the configured sender to
/// itself. `None` when email is not configured or notification is off.
pub fn failure_notice(config: &AppConfig, error: &(dyn Error + 'static)) -> Option<MailMessage> {
    let email = config.email.as_ref().filter(|email| email.notify_on_failure)?;
    let program = &config.main.program;

    Some(
        MailMessage::new(
            email.sender.as_str(),
            vec![email.sender.clone()],
            format!("{FAILURE_SUBJECT} - {program}"),
            format!("{program}: {FAILURE_SUBJECT}\n\n{}\n", error_chain(error)),
        )
        .with_priority(Priority::High),
    )
}

fn error_chain(error: &(dyn Error + 'static)) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str("\n  caused by: ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

#[cfg(test)]
mod tests {
    use std::{io, path::PathBuf};

    use super::*;
    use crate::infra::{
        config::{LogConfig, MainConfig},
        error::AppError,
    };

    fn config(email: Option<EmailConfig>) -> AppConfig {
        AppConfig {
            main: MainConfig {
                program: "nightly".to_owned(),
            },
            logging: LogConfig {
                dir: PathBuf::from("logs"),
                level: "info".to_owned(),
            },
            syslog: None,
            oracle: None,
            email,
        }
    }

    fn email(notify_on_failure: bool) -> EmailConfig {
        EmailConfig {
            host: "mail.example.com".to_owned(),
            port: 25,
            sender: "robot@example.com".to_owned(),
            notify_on_failure,
            timeout_secs: 30,
        }
    }

    fn failure() -> AppError {
        AppError::ConfigRead {
            path: PathBuf::from("app.toml"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        }
    }

    #[test]
    fn failure_notice_goes_to_sender_with_high_priority() {
        let message =
            failure_notice(&config(Some(email(true))), &failure()).expect("notice should be built");

        assert_eq!(message.from, "robot@example.com");
        assert_eq!(message.to, vec!["robot@example.com".to_owned()]);
        assert_eq!(message.subject, "EXCEPTION - nightly");
        assert_eq!(message.priority, Priority::High);
        assert!(message.body.starts_with("nightly: EXCEPTION"));
        assert!(message.body.contains("failed to read config file at app.toml"));
        assert!(message.body.contains("caused by: no such file"));
    }

    #[test]
    fn no_notice_without_email_section_or_when_disabled() {
        assert!(failure_notice(&config(None), &failure()).is_none());
        assert!(failure_notice(&config(Some(email(false))), &failure()).is_none());
    }

    #[test]
    fn outgoing_message_flattens_comma_separated_recipients() {
        let message = outgoing_message(
            &email(true),
            &["a@example.com, b@example.com".to_owned(), "c@example.com".to_owned()],
            "hi",
            "body",
            false,
        );

        assert_eq!(message.from, "robot@example.com");
        assert_eq!(
            message.to,
            vec![
                "a@example.com".to_owned(),
                "b@example.com".to_owned(),
                "c@example.com".to_owned(),
            ]
        );
        assert_eq!(message.priority, Priority::Normal);
    }
}
