use connectors::error::FetchError;
use engine_config::settings::error::SettingsError;
use engine_core::error::ScrollError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Failed to open the result scroller: {0}")]
    Scroll(#[from] ScrollError),

    #[error("Search request failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}
