pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::display::{HtmlFileDisplay, MemoryDisplay, StdoutDisplay};
pub use crate::config::{env::EnvConfig, toml_config::TomlConfig, CounterConfig};
pub use crate::core::{contract::ContractCheck, fetcher::CountFetcher, widget::CounterWidget};
pub use crate::domain::model::{BodyKind, ContractReport, Count};
pub use crate::utils::error::{ContractViolation, CounterError, Result};
