use crate::{env::EnvManager, settings::error::SettingsError};
use connectors::ariel::client::{ArielClient, ClientConfig};
use engine_core::settings::{DEFAULT_WINDOW, RefillMode, ScrollSettings};
use std::time::Duration;
use tracing::info;

pub const BASE_URL_VAR: &str = "ARIEL_BASE_URL";
pub const SEC_TOKEN_VAR: &str = "ARIEL_SEC_TOKEN";
pub const API_VERSION_VAR: &str = "ARIEL_API_VERSION";
pub const TIMEOUT_VAR: &str = "ARIEL_TIMEOUT_SECS";
pub const WINDOW_VAR: &str = "ARIEL_WINDOW";
pub const REFILL_MODE_VAR: &str = "ARIEL_REFILL_MODE";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything needed to connect to the search API and scroll its results.
#[derive(Debug, Clone)]
pub struct ArielSettings {
    pub client: ClientConfig,
    pub scroll: ScrollSettings,
}

impl ArielSettings {
    pub fn from_env(env: &EnvManager) -> Result<Self, SettingsError> {
        let base_url = env.require(BASE_URL_VAR)?;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(SettingsError::Invalid {
                key: BASE_URL_VAR.to_string(),
                value: base_url.to_string(),
                reason: "expected an http:// or https:// URL".to_string(),
            });
        }

        let timeout_secs = env.parse_or(TIMEOUT_VAR, DEFAULT_TIMEOUT_SECS)?;
        let window = env.parse_or(WINDOW_VAR, DEFAULT_WINDOW)?;
        if window == 0 {
            return Err(SettingsError::Invalid {
                key: WINDOW_VAR.to_string(),
                value: "0".to_string(),
                reason: "window must be greater than zero".to_string(),
            });
        }
        let mode = env.parse_or(REFILL_MODE_VAR, RefillMode::default())?;

        let client = ClientConfig {
            base_url: base_url.to_string(),
            sec_token: env.get(SEC_TOKEN_VAR).map(str::to_string),
            api_version: env.get(API_VERSION_VAR).map(str::to_string),
            timeout: Duration::from_secs(timeout_secs),
        };

        info!(
            "Loaded settings for {} (window {}, {} refills)",
            client.base_url, window, mode
        );

        Ok(ArielSettings {
            client,
            scroll: ScrollSettings { window, mode },
        })
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.scroll.window = window;
        self
    }

    pub fn with_mode(mut self, mode: RefillMode) -> Self {
        self.scroll.mode = mode;
        self
    }

    pub fn build_client(&self) -> Result<ArielClient, SettingsError> {
        Ok(ArielClient::new(self.client.clone())?)
    }
}
