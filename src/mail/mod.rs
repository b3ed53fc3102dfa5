//! Outgoing email over SMTP.

mod error;
mod message;
mod transport;

pub use error::MailError;
pub use message::{parse_recipients, MailMessage, Priority};
pub use transport::{send_mail, MailTransport, SmtpMailer};
