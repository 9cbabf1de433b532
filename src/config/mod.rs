#[cfg(feature = "cli")]
pub mod cli;
pub mod env;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::time::Duration;

/// API Gateway stage serving the live counter.
pub const DEFAULT_ENDPOINT_URL: &str = "https://9q0daknm1d.execute-api.us-east-1.amazonaws.com/prod";
pub const DEFAULT_ELEMENT_ID: &str = "count";
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// 最終生效的設定
#[derive(Debug, Clone, PartialEq)]
pub struct CounterConfig {
    pub endpoint_url: String,
    pub element_id: String,
    pub request_timeout_secs: Option<u64>,
    pub html_path: Option<String>,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            element_id: DEFAULT_ELEMENT_ID.to_string(),
            request_timeout_secs: None,
            html_path: None,
        }
    }
}

/// One configuration layer; unset fields fall through to the layer below.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub endpoint_url: Option<String>,
    pub element_id: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub html_path: Option<String>,
}

impl CounterConfig {
    pub fn with_endpoint(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            ..Self::default()
        }
    }

    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(endpoint_url) = overrides.endpoint_url {
            self.endpoint_url = endpoint_url;
        }
        if let Some(element_id) = overrides.element_id {
            self.element_id = element_id;
        }
        if overrides.request_timeout_secs.is_some() {
            self.request_timeout_secs = overrides.request_timeout_secs;
        }
        if overrides.html_path.is_some() {
            self.html_path = overrides.html_path;
        }
    }

    /// Layers are applied lowest priority first.
    pub fn layered(layers: impl IntoIterator<Item = ConfigOverrides>) -> Self {
        let mut config = Self::default();
        for layer in layers {
            config.apply(layer);
        }
        config
    }
}

impl ConfigProvider for CounterConfig {
    fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    fn element_id(&self) -> &str {
        &self.element_id
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Validate for CounterConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("endpoint_url", &self.endpoint_url)?;
        validation::validate_element_id("element_id", &self.element_id)?;

        if let Some(timeout) = self.request_timeout_secs {
            validation::validate_range("request_timeout_secs", timeout, 1, MAX_TIMEOUT_SECS)?;
        }

        if let Some(path) = &self.html_path {
            validation::validate_path("html_path", path)?;
        }

        tracing::debug!("✅ Counter configuration validation passed");
        Ok(())
    }
}
