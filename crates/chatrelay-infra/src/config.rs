//! Configuration loader for chatrelay.
//!
//! Reads a TOML file into [`RelayConfig`], then layers `CHATRELAY_*`
//! environment overrides on top. The upstream API key is resolved separately
//! from the env var named by `upstream.api_key_env` and is never part of the
//! file.

use std::path::Path;

use secrecy::SecretString;

use chatrelay_types::config::RelayConfig;
use chatrelay_types::error::ConfigError;

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "chatrelay.toml";

/// Load configuration from `path`, or from [`DEFAULT_CONFIG_FILE`] if `None`.
///
/// - An explicitly given path must exist and parse; errors are returned.
/// - The default path may be missing (defaults are used, logged at debug).
///   If it exists but is malformed, a warning is logged and defaults are used.
pub async fn load_config(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    match path {
        Some(path) => read_config_file(path).await,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            match tokio::fs::try_exists(default_path).await {
                Ok(true) => match read_config_file(default_path).await {
                    Ok(config) => Ok(config),
                    Err(err) => {
                        tracing::warn!("{err}, using defaults");
                        Ok(RelayConfig::default())
                    }
                },
                _ => {
                    tracing::debug!(
                        "No {} found in working directory, using defaults",
                        DEFAULT_CONFIG_FILE
                    );
                    Ok(RelayConfig::default())
                }
            }
        }
    }
}

async fn read_config_file(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;

    let config = toml::from_str::<RelayConfig>(&content).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    validate(&config)?;
    Ok(config)
}

/// Reject values that parse but cannot work at runtime.
fn validate(config: &RelayConfig) -> Result<(), ConfigError> {
    if config.upstream.timeout_secs == 0 {
        return Err(ConfigError::InvalidValue {
            key: "upstream.timeout_secs".to_string(),
            message: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

/// Apply `CHATRELAY_*` overrides read through `lookup`.
///
/// Recognized keys: `CHATRELAY_HOST`, `CHATRELAY_PORT`, `CHATRELAY_BASE_URL`,
/// `CHATRELAY_MODEL`, `CHATRELAY_WINDOW_SIZE`. Numeric values that fail to
/// parse are an error rather than silently ignored.
pub fn apply_env_overrides<F>(mut config: RelayConfig, lookup: F) -> Result<RelayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("CHATRELAY_HOST") {
        config.server.host = host;
    }
    if let Some(port) = lookup("CHATRELAY_PORT") {
        config.server.port = parse_value("CHATRELAY_PORT", &port)?;
    }
    if let Some(base_url) = lookup("CHATRELAY_BASE_URL") {
        config.upstream.base_url = base_url;
    }
    if let Some(model) = lookup("CHATRELAY_MODEL") {
        config.upstream.model = model;
    }
    if let Some(window) = lookup("CHATRELAY_WINDOW_SIZE") {
        config.history.window_size = parse_value("CHATRELAY_WINDOW_SIZE", &window)?;
    }
    Ok(config)
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}

/// Resolve the upstream API key from the env var named in the config.
///
/// Blank values count as missing.
pub fn resolve_api_key<F>(config: &RelayConfig, lookup: F) -> Result<SecretString, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = &config.upstream.api_key_env;
    match lookup(var) {
        Some(key) if !key.trim().is_empty() => Ok(SecretString::from(key.trim().to_string())),
        _ => Err(ConfigError::MissingApiKey(var.clone())),
    }
}

/// Process-environment lookup for [`apply_env_overrides`] and [`resolve_api_key`].
///
/// Variables with invalid Unicode are treated as unset.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
