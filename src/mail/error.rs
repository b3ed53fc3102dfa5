use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("message has no recipients")]
    NoRecipients,
    #[error("invalid email address `{address}`: {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },
    #[error("failed to build message: {0}")]
    Build(#[source] lettre::error::Error),
    #[error("failed to send mail via {relay}: {source}")]
    Transport {
        relay: String,
        #[source]
        source: lettre::transport::smtp::Error,
    },
}
