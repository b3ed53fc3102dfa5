//! Oracle access: a single owned session per caller, no pooling.

mod error;
mod record;
mod session;

pub use error::DbError;
pub use record::Record;
pub use session::OracleSession;
