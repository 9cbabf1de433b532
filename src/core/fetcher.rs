use crate::adapters::http::build_client;
use crate::core::{ConfigProvider, Count, CountSource, FetchedCount};
use crate::utils::error::{CounterError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Issues exactly one GET per call against the configured endpoint.
pub struct CountFetcher {
    endpoint_url: String,
    client: Client,
}

impl CountFetcher {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Ok(Self {
            endpoint_url: config.endpoint_url().to_string(),
            client: build_client(config.request_timeout())?,
        })
    }
}

#[async_trait]
impl CountSource for CountFetcher {
    async fn fetch(&self) -> Result<FetchedCount> {
        tracing::debug!("Requesting count from: {}", self.endpoint_url);
        let response = self.client.get(&self.endpoint_url).send().await?;

        let status = response.status();
        tracing::debug!("Counter API response status: {}", status);

        if !status.is_success() {
            return Err(CounterError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let count = Count::from_body(&body)?;

        Ok(FetchedCount {
            count,
            status: status.as_u16(),
            received_at: chrono::Utc::now(),
        })
    }
}
