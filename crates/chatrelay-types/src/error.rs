use thiserror::Error;

/// Errors surfaced by a chat exchange.
///
/// A missing session on clear is not an error; `clear_history` reports it
/// as `false`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    /// The caller sent a missing or blank message. Nothing was read or sent.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The upstream call failed or returned nothing usable. History is unchanged.
    #[error("upstream error: {0}")]
    Upstream(String),
}

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("API key not set (expected env var {0})")]
    MissingApiKey(String),
}
