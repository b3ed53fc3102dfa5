//! Use case layer: application workflows and orchestration.

pub mod bootstrap;
pub mod commands;
pub mod context;
pub mod notify;
pub mod timing;
