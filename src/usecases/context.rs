use crate::infra::{config::AppConfig, logging::LogTargets};

#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    pub logs: LogTargets,
}

impl AppContext {
    pub fn new(config: AppConfig, logs: LogTargets) -> Self {
        Self { config, logs }
    }
}
