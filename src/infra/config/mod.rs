mod adapter;
mod app_config;
mod file_config;
mod loader;

pub use adapter::FileConfigAdapter;
pub use app_config::{AppConfig, EmailConfig, LogConfig, MainConfig, OracleConfig, SyslogConfig};
pub use loader::{default_config_path, load};
