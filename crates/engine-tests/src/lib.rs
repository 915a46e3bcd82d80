#![allow(dead_code)]

use connectors::ariel::client::{ArielClient, ClientConfig};
use std::time::Duration;

pub mod fetch;
pub mod server;

pub const TEST_TOKEN: &str = "test-token";

/// Client pointed at a running test server.
pub fn client_for(base_url: &str) -> ArielClient {
    let mut config = ClientConfig::new(base_url);
    config.sec_token = Some(TEST_TOKEN.to_string());
    config.api_version = Some("12.0".to_string());
    config.timeout = Duration::from_secs(10);
    ArielClient::new(config).expect("build client")
}
