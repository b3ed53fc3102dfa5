use serde::{Deserialize, Serialize};

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_SYSLOG_PORT: u16 = 514;
pub const DEFAULT_ORACLE_PORT: u16 = 1521;
pub const DEFAULT_SMTP_PORT: u16 = 25;
pub const DEFAULT_SMTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub main: MainConfig,
    pub logging: LogConfig,
    pub syslog: Option<SyslogConfig>,
    pub oracle: Option<OracleConfig>,
    pub email: Option<EmailConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MainConfig {
    pub program: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub dir: std::path::PathBuf,
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyslogConfig {
    pub server: String,
    pub port: u16,
    pub program_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OracleConfig {
    pub host: String,
    pub port: u16,
    pub service: String,
    pub login: String,
    pub password: String,
    pub client_lib_dir: Option<std::path::PathBuf>,
    pub connect_timeout_secs: Option<u64>,
}

impl OracleConfig {
    /// EZConnect descriptor, `host:port/service[?connect_timeout=N]`.
    pub fn connect_string(&self) -> String {
        let mut target = format!("{}:{}/{}", self.host, self.port, self.service);
        if let Some(secs) = self.connect_timeout_secs {
            target.push_str(&format!("?connect_timeout={secs}"));
        }
        target
    }

    /// `login@host/service`, safe to log.
    pub fn display_target(&self) -> String {
        format!("{}@{}/{}", self.login, self.host, self.service)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailConfig {
    pub host: String,
    pub port: u16,
    pub sender: String,
    pub notify_on_failure: bool,
    pub timeout_secs: u64,
}
