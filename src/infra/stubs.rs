use std::cell::RefCell;

use lettre::Message;

use crate::mail::{MailError, MailTransport};

/// Keeps the formatted text of every delivered message.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub sent: RefCell<Vec<String>>,
}

impl MailTransport for RecordingTransport {
    fn deliver(&self, email: &Message) -> Result<(), MailError> {
        let raw = String::from_utf8_lossy(&email.formatted()).into_owned();
        self.sent.borrow_mut().push(raw);
        Ok(())
    }
}
