pub mod config;
pub mod errors;
pub mod models;
pub mod parsers;
pub mod providers;
pub mod routes;
pub mod services;

use std::time::Duration;

use reqwest::Client;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: config::AppConfig,
    pub http: Client,
}

impl AppState {
    /// Build the state, constructing the HTTP client that every hosted
    /// provider call goes through. The client carries the provider
    /// timeout so a hung remote call cannot block a request forever.
    pub fn new(config: config::AppConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.provider_timeout_secs))
            .build()?;
        Ok(Self { config, http })
    }
}
