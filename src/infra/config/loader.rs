use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::infra::{
    config::{
        file_config::{FileConfig, ResolveError},
        AppConfig,
    },
    error::AppError,
};

const FALLBACK_CONFIG_PATH: &str = "appbase.toml";

/// `<exe dir>/<exe stem>.toml`, or `appbase.toml` in the working directory
/// when the executable path cannot be resolved.
pub fn default_config_path() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| {
            let stem = exe.file_stem()?.to_owned();
            let dir = exe.parent()?.to_path_buf();
            Some(dir.join(stem).with_extension("toml"))
        })
        .unwrap_or_else(|| PathBuf::from(FALLBACK_CONFIG_PATH))
}

pub fn load(path: Option<&Path>) -> Result<AppConfig, AppError> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);

    let raw = fs::read_to_string(&config_path).map_err(|source| AppError::ConfigRead {
        path: config_path.clone(),
        source,
    })?;

    let file_config: FileConfig =
        toml::from_str(&raw).map_err(|source| AppError::ConfigParse {
            path: config_path.clone(),
            source,
        })?;

    file_config.resolve().map_err(|error| match error {
        ResolveError::MissingKey(key) => AppError::ConfigMissingKey {
            path: config_path,
            key,
        },
        ResolveError::InvalidValue { key, value } => AppError::ConfigInvalidValue {
            path: config_path,
            key,
            value,
        },
    })
}
