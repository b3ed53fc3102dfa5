use std::path::Path;

use crate::{
    cli::Cli,
    infra::{
        self,
        config::{AppConfig, FileConfigAdapter},
        contracts::ConfigAdapter,
        error::AppError,
    },
    usecases::context::AppContext,
};

/// Privilege guard, config, logging, start banner. Runs once per process.
pub fn bootstrap(cli: &Cli) -> Result<AppContext, AppError> {
    infra::privileges::ensure_unprivileged(cli.allow_root)?;

    let config = load_config(cli.config.as_deref())?;
    let logs = infra::logging::init(&config.logging, config.syslog.as_ref(), cli.debug)?;

    tracing::info!(program = %config.main.program, "start");
    tracing::info!(
        command_line = %infra::secrets::redact_args(std::env::args_os()),
        "command line"
    );
    tracing::debug!(
        info_log = %logs.info_file.display(),
        debug_log = ?logs.debug_file,
        "logging initialized"
    );

    Ok(AppContext::new(config, logs))
}

fn load_config(config_path: Option<&Path>) -> Result<AppConfig, AppError> {
    FileConfigAdapter::new(config_path).load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_file_fails_before_logging_is_touched() {
        let error = load_config(Some(Path::new("./missing-config.toml")))
            .expect_err("config file is required");

        assert!(matches!(error, AppError::ConfigRead { .. }));
    }

    #[test]
    fn loads_config_through_file_adapter() {
        let file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp config should be creatable");
        std::fs::write(
            file.path(),
            "[main]\nprogram = \"boot\"\n\n[logging]\ndir = \"logs\"\n",
        )
        .expect("must write test config");

        let config = load_config(Some(file.path())).expect("config must load");

        assert_eq!(config.main.program, "boot");
    }
}
