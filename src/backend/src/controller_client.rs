#![cfg_attr(feature = "mock", allow(dead_code, unused_imports))]

use crate::{
    config::{AppConfig, ControllerConfig},
    http_client::handle_http_response,
    services::tracking::ControllerReport,
};
use anyhow::{Context, Result};
use log::debug;
#[cfg(feature = "mock")]
use mockall::automock;
use reqwest::Client;
use trait_variant::make;

#[make(Send)]
#[cfg_attr(feature = "mock", automock)]
pub trait ControllerClient {
    async fn send_report(&self, report: ControllerReport) -> Result<()>;
}

/// HTTP client for the ESP32 motor controller
#[derive(Clone)]
pub struct Esp32Client {
    client: Client,
    endpoint: String,
}

impl Esp32Client {
    pub fn new() -> Result<Self> {
        Self::with_config(&AppConfig::get().controller)
    }

    pub fn with_config(config: &ControllerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to create controller HTTP client")?;

        Ok(Esp32Client {
            client,
            endpoint: config.data_endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ControllerClient for Esp32Client {
    async fn send_report(&self, report: ControllerReport) -> Result<()> {
        debug!("POST {} with body: {report:?}", self.endpoint);

        let res = self
            .client
            .post(&self.endpoint)
            .json(&report)
            .send()
            .await
            .context(format!("failed to send POST request to {}", self.endpoint))?;

        handle_http_response(res, &format!("POST {}", self.endpoint))
            .await
            .map(|_| ())
    }
}
