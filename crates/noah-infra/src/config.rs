//! Configuration loading for Noah.
//!
//! Reads `config.toml` from the data directory (`~/.noah/` by default) into
//! [`AppConfig`], then layers `NOAH_*` environment overrides on top. Env
//! access goes through a lookup closure so tests never mutate the process
//! environment.

use std::path::{Path, PathBuf};

use noah_types::config::{AppConfig, LlmConfig};
use noah_types::error::ConfigError;
use secrecy::SecretString;

use crate::sqlite::pool::default_database_url;

pub const CONFIG_FILE: &str = "config.toml";

/// Read a variable from the process environment.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Resolve the data directory: `NOAH_DATA_DIR`, else `~/.noah`.
pub fn resolve_data_dir(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(dir) = lookup("NOAH_DATA_DIR").filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".noah")
}

/// Load configuration from `path`.
///
/// - Missing file: [`AppConfig::default()`].
/// - Unreadable or malformed file: logs a warning and returns the default.
pub async fn load_config(path: &Path) -> AppConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            AppConfig::default()
        }
    }
}

/// Apply `NOAH_HOST`, `NOAH_PORT`, `NOAH_DATABASE_URL` and `NOAH_SERVER_URL`.
///
/// An unparseable port is ignored with a warning.
pub fn apply_env_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(host) = lookup("NOAH_HOST") {
        config.server.host = host;
    }
    if let Some(port) = lookup("NOAH_PORT") {
        match port.trim().parse::<u16>() {
            Ok(port) => config.server.port = port,
            Err(err) => tracing::warn!("Ignoring NOAH_PORT={port}: {err}"),
        }
    }
    if let Some(url) = lookup("NOAH_DATABASE_URL") {
        config.server.database_url = Some(url);
    }
    if let Some(url) = lookup("NOAH_SERVER_URL") {
        config.client.server_url = url;
    }
}

/// Load `{data_dir}/config.toml` (or `explicit_path`) and apply env overrides.
pub async fn load_app_config(
    data_dir: &Path,
    explicit_path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> AppConfig {
    let path = explicit_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| data_dir.join(CONFIG_FILE));
    let mut config = load_config(&path).await;
    apply_env_overrides(&mut config, lookup);
    config
}

/// The configured database URL, or `noah.db` inside `data_dir`.
pub fn database_url(config: &AppConfig, data_dir: &Path) -> String {
    config
        .server
        .database_url
        .clone()
        .unwrap_or_else(|| default_database_url(data_dir))
}

/// Read the API key from the variable named by `llm.api_key_env`.
pub fn resolve_api_key(
    config: &LlmConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    lookup(&config.api_key_env)
        .filter(|key| !key.trim().is_empty())
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::MissingCredential(config.api_key_env.clone()))
}
