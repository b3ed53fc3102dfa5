use std::path::PathBuf;

use thiserror::Error;

use crate::{db::DbError, mail::MailError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("config file at {path} is missing required key `{key}`")]
    ConfigMissingKey { path: PathBuf, key: &'static str },
    #[error("config file at {path} has invalid value `{value}` for `{key}`")]
    ConfigInvalidValue {
        path: PathBuf,
        key: &'static str,
        value: String,
    },
    #[error("config section [{section}] is required for this command")]
    ConfigSectionMissing { section: &'static str },
    #[error("failed to open log sink {target}: {source}")]
    LogSink {
        target: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to initialize logging: {0}")]
    LoggingInit(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("refusing to run with root privileges (pass --allow-root to override)")]
    RunningAsRoot,
    #[error(transparent)]
    Database(#[from] DbError),
    #[error(transparent)]
    Mail(#[from] MailError),
}
