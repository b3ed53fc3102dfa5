use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "appbase",
    version,
    about = "Application skeleton with config, logging, Oracle and SMTP helpers"
)]
pub struct Cli {
    /// Path to config file (default: <exe dir>/<exe name>.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Also write a debug log
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Allow running with root privileges
    #[arg(long, global = true)]
    pub allow_root: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print a greeting
    Hello {
        #[arg(default_value = "world")]
        name: String,
    },
    /// Print an argument and log the elapsed time
    Timed { arg: String },
    /// Check Oracle connectivity with a probe query against DUAL
    DbCheck,
    /// Run a query and print its rows
    Query { sql: String },
    /// Execute a statement and print the affected row count
    Exec {
        sql: String,
        /// Commit before disconnecting
        #[arg(long)]
        commit: bool,
    },
    /// Send an email through the configured SMTP relay
    Notify {
        /// Recipients; each value may hold comma-separated addresses
        #[arg(required = true)]
        to: Vec<String>,
        #[arg(short, long)]
        subject: String,
        #[arg(short, long, default_value = "")]
        body: String,
        /// Mark the message high priority
        #[arg(long)]
        urgent: bool,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hello { .. } => "hello",
            Self::Timed { .. } => "timed",
            Self::DbCheck => "db-check",
            Self::Query { .. } => "query",
            Self::Exec { .. } => "exec",
            Self::Notify { .. } => "notify",
        }
    }
}
