//! Infrastructure layer: config, logging and OS integrations.

pub mod config;
pub mod contracts;
pub mod error;
pub mod logging;
pub mod privileges;
pub mod secrets;
pub mod syslog;
#[cfg(test)]
pub mod stubs;
