use connectors::error::FetchError;
use thiserror::Error;

/// Errors raised while loading scroll and connection settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A required variable was not set.
    #[error("Missing required setting: {0}")]
    Missing(String),

    /// A variable was set to a value that cannot be used.
    #[error("Invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },

    /// The env file could not be read or parsed.
    #[error("Env file error: {0}")]
    EnvFile(String),

    /// The HTTP client could not be built from the settings.
    #[error("Client error: {0}")]
    Client(#[from] FetchError),
}
