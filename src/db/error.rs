use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("invalid oracle config: {0}")]
    InvalidConfig(&'static str),
    #[error("failed to initialize oracle client from {dir}: {source}")]
    ClientInit {
        dir: PathBuf,
        #[source]
        source: oracle::Error,
    },
    #[error("failed to connect to {database}: {source}")]
    Connect {
        database: String,
        #[source]
        source: oracle::Error,
    },
    #[error("statement failed: {source}")]
    Execute {
        #[source]
        source: oracle::Error,
    },
    #[error("failed to close session to {database}: {source}")]
    Disconnect {
        database: String,
        #[source]
        source: oracle::Error,
    },
}
