use std::{path::PathBuf, str::FromStr};

use serde::Deserialize;
use tracing_subscriber::filter::LevelFilter;

use crate::infra::config::{
    app_config::{
        DEFAULT_LOG_LEVEL, DEFAULT_ORACLE_PORT, DEFAULT_SMTP_PORT, DEFAULT_SMTP_TIMEOUT_SECS,
        DEFAULT_SYSLOG_PORT,
    },
    AppConfig, EmailConfig, LogConfig, MainConfig, OracleConfig, SyslogConfig,
};

/// First key, by dotted name, that kept the file from resolving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    MissingKey(&'static str),
    InvalidValue { key: &'static str, value: String },
}

fn require<T>(value: Option<T>, key: &'static str) -> Result<T, ResolveError> {
    value.ok_or(ResolveError::MissingKey(key))
}

/// Accepts the level names `LevelFilter` knows (`off`, `error` .. `trace`),
/// in any case.
fn log_level(value: Option<String>) -> Result<String, ResolveError> {
    let Some(level) = value else {
        return Ok(DEFAULT_LOG_LEVEL.to_owned());
    };

    match LevelFilter::from_str(level.trim()) {
        Ok(_) => Ok(level.trim().to_owned()),
        Err(_) => Err(ResolveError::InvalidValue {
            key: "logging.level",
            value: level,
        }),
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub main: Option<FileMainConfig>,
    pub logging: Option<FileLogConfig>,
    pub syslog: Option<FileSyslogConfig>,
    pub oracle: Option<FileOracleConfig>,
    pub email: Option<FileEmailConfig>,
}

impl FileConfig {
    pub fn resolve(self) -> Result<AppConfig, ResolveError> {
        let main = self.main.unwrap_or_default().resolve()?;
        let logging = self.logging.unwrap_or_default().resolve()?;

        let syslog = match self.syslog {
            Some(syslog) => syslog.resolve(&main.program)?,
            None => None,
        };

        Ok(AppConfig {
            main,
            logging,
            syslog,
            oracle: self.oracle.map(FileOracleConfig::resolve).transpose()?,
            email: self.email.map(FileEmailConfig::resolve).transpose()?,
        })
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileMainConfig {
    pub program: Option<String>,
}

impl FileMainConfig {
    fn resolve(self) -> Result<MainConfig, ResolveError> {
        Ok(MainConfig {
            program: require(self.program, "main.program")?,
        })
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub dir: Option<PathBuf>,
    pub level: Option<String>,
}

impl FileLogConfig {
    fn resolve(self) -> Result<LogConfig, ResolveError> {
        Ok(LogConfig {
            dir: require(self.dir, "logging.dir")?,
            level: log_level(self.level)?,
        })
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileSyslogConfig {
    pub enabled: Option<bool>,
    pub server: Option<String>,
    pub port: Option<u16>,
    pub program_name: Option<String>,
}

impl FileSyslogConfig {
    fn resolve(self, program: &str) -> Result<Option<SyslogConfig>, ResolveError> {
        if !self.enabled.unwrap_or(false) {
            return Ok(None);
        }

        Ok(Some(SyslogConfig {
            server: require(self.server, "syslog.server")?,
            port: self.port.unwrap_or(DEFAULT_SYSLOG_PORT),
            program_name: self.program_name.unwrap_or_else(|| program.to_owned()),
        }))
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileOracleConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub service: Option<String>,
    pub login: Option<String>,
    pub password: Option<String>,
    pub client_lib_dir: Option<PathBuf>,
    pub connect_timeout_secs: Option<u64>,
}

impl FileOracleConfig {
    fn resolve(self) -> Result<OracleConfig, ResolveError> {
        Ok(OracleConfig {
            host: require(self.host, "oracle.host")?,
            port: self.port.unwrap_or(DEFAULT_ORACLE_PORT),
            service: require(self.service, "oracle.service")?,
            login: require(self.login, "oracle.login")?,
            password: require(self.password, "oracle.password")?,
            client_lib_dir: self.client_lib_dir,
            connect_timeout_secs: self.connect_timeout_secs,
        })
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileEmailConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub sender: Option<String>,
    pub notify_on_failure: Option<bool>,
    pub timeout_secs: Option<u64>,
}

impl FileEmailConfig {
    fn resolve(self) -> Result<EmailConfig, ResolveError> {
        Ok(EmailConfig {
            host: require(self.host, "email.host")?,
            port: self.port.unwrap_or(DEFAULT_SMTP_PORT),
            sender: require(self.sender, "email.sender")?,
            notify_on_failure: self.notify_on_failure.unwrap_or(true),
            timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_SMTP_TIMEOUT_SECS),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> FileConfig {
        toml::from_str(raw).expect("fixture must be valid toml")
    }

    #[test]
    fn disabled_syslog_resolves_to_none_even_without_server() {
        let config = parse(
            r#"[main]
program = "app"

[logging]
dir = "/tmp"

[syslog]
enabled = false
"#,
        )
        .resolve()
        .expect("config should resolve");

        assert_eq!(config.syslog, None);
    }

    #[test]
    fn syslog_program_name_falls_back_to_program() {
        let config = parse(
            r#"[main]
program = "app"

[logging]
dir = "/tmp"

[syslog]
enabled = true
server = "loghost"
"#,
        )
        .resolve()
        .expect("config should resolve");

        let syslog = config.syslog.expect("syslog should be enabled");
        assert_eq!(syslog.program_name, "app");
        assert_eq!(syslog.port, DEFAULT_SYSLOG_PORT);
    }

    #[test]
    fn reports_first_missing_key_in_optional_section() {
        let missing = parse(
            r#"[main]
program = "app"

[logging]
dir = "/tmp"

[oracle]
host = "db"
service = "ORCL"
password = "secret"
"#,
        )
        .resolve()
        .expect_err("login is required");

        assert_eq!(missing, ResolveError::MissingKey("oracle.login"));
    }

    #[test]
    fn absent_main_section_reports_program_key() {
        let missing = FileConfig::default()
            .resolve()
            .expect_err("main.program is required");

        assert_eq!(missing, ResolveError::MissingKey("main.program"));
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let config = parse(
            r#"[main]
program = "app"

[logging]
dir = "/tmp"
level = "WARN"
"#,
        )
        .resolve()
        .expect("config should resolve");

        assert_eq!(config.logging.level, "WARN");
    }

    #[test]
    fn misspelled_log_level_is_rejected() {
        let error = parse(
            r#"[main]
program = "app"

[logging]
dir = "/tmp"
level = "inf"
"#,
        )
        .resolve()
        .expect_err("`inf` is not a level");

        assert_eq!(
            error,
            ResolveError::InvalidValue {
                key: "logging.level",
                value: "inf".to_owned(),
            }
        );
    }
}
