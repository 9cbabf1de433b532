use crate::config::{ConfigOverrides, CounterConfig};
use crate::utils::error::{CounterError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub counter: CounterSection,
    pub display: Option<DisplaySection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CounterSection {
    pub endpoint_url: Option<String>,
    pub element_id: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplaySection {
    pub html_path: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CounterError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CounterError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${COUNTER_ENDPOINT_URL})；未定義的變數原樣保留
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CounterError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            endpoint_url: self.counter.endpoint_url.clone(),
            element_id: self.counter.element_id.clone(),
            request_timeout_secs: self.counter.request_timeout_secs,
            html_path: self.display.as_ref().and_then(|d| d.html_path.clone()),
        }
    }

    /// File values on top of the built-in defaults.
    pub fn to_counter_config(&self) -> CounterConfig {
        CounterConfig::layered([self.overrides()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ELEMENT_ID;
    use crate::utils::validation::Validate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[counter]
endpoint_url = "https://api.example.com/prod"
element_id = "visitors"
request_timeout_secs = 5

[display]
html_path = "./site/index.html"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let resolved = config.to_counter_config();

        assert_eq!(resolved.endpoint_url, "https://api.example.com/prod");
        assert_eq!(resolved.element_id, "visitors");
        assert_eq!(resolved.request_timeout_secs, Some(5));
        assert_eq!(resolved.html_path.as_deref(), Some("./site/index.html"));
        assert!(resolved.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        let resolved = config.to_counter_config();
        assert_eq!(resolved, CounterConfig::default());
        assert_eq!(resolved.element_id, DEFAULT_ELEMENT_ID);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_COUNTER_ENDPOINT", "https://test.api.com/prod");

        let toml_content = r#"
[counter]
endpoint_url = "${TEST_COUNTER_ENDPOINT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.counter.endpoint_url.as_deref(),
            Some("https://test.api.com/prod")
        );

        std::env::remove_var("TEST_COUNTER_ENDPOINT");
    }

    #[test]
    fn test_unresolved_variable_fails_validation() {
        let toml_content = r#"
[counter]
endpoint_url = "${TEST_COUNTER_UNDEFINED_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.counter.endpoint_url.as_deref(),
            Some("${TEST_COUNTER_UNDEFINED_VAR}")
        );
        assert!(config.to_counter_config().validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[counter\nendpoint_url = 1").unwrap_err();
        assert!(matches!(err, CounterError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[counter]
endpoint_url = "http://localhost:3000/prod"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(
            config.counter.endpoint_url.as_deref(),
            Some("http://localhost:3000/prod")
        );
    }
}
