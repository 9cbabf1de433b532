use crate::config::env::EnvConfig;
use crate::config::toml_config::TomlConfig;
use crate::config::{ConfigOverrides, CounterConfig};
use crate::utils::error::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "visitor-counter")]
#[command(about = "Fetch the visitor count and render it, or check the counter API contract")]
pub struct CliConfig {
    #[arg(long, help = "Counter endpoint URL")]
    pub endpoint_url: Option<String>,

    #[arg(long, help = "Id of the element that shows the count")]
    pub element_id: Option<String>,

    #[arg(long, help = "HTML file to update instead of printing to stdout")]
    pub output: Option<String>,

    #[arg(long, help = "TOML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Request timeout in seconds (default: wait indefinitely)")]
    pub timeout_secs: Option<u64>,

    #[arg(long, help = "Run the endpoint contract check instead of rendering")]
    pub check: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            endpoint_url: self.endpoint_url.clone(),
            element_id: self.element_id.clone(),
            request_timeout_secs: self.timeout_secs,
            html_path: self.output.clone(),
        }
    }

    /// 合併設定來源：預設值 < 環境變數 < TOML 檔 < 命令列參數
    pub fn resolve(&self) -> Result<CounterConfig> {
        let mut layers = vec![EnvConfig::from_env()?];

        if let Some(path) = &self.config {
            tracing::debug!("Loading config file: {}", path);
            layers.push(TomlConfig::from_file(path)?.overrides());
        }

        layers.push(self.overrides());
        Ok(CounterConfig::layered(layers))
    }
}
