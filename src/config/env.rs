use crate::config::ConfigOverrides;
use crate::utils::error::{CounterError, Result};
use std::env;

pub const ENDPOINT_URL_VAR: &str = "COUNTER_ENDPOINT_URL";
pub const ELEMENT_ID_VAR: &str = "COUNTER_ELEMENT_ID";
pub const TIMEOUT_SECS_VAR: &str = "COUNTER_TIMEOUT_SECS";
pub const HTML_PATH_VAR: &str = "COUNTER_HTML_PATH";

/// 從環境變數讀取設定
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfig;

impl EnvConfig {
    pub fn from_env() -> Result<ConfigOverrides> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`EnvConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<ConfigOverrides>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let request_timeout_secs = match non_empty(TIMEOUT_SECS_VAR) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                CounterError::InvalidConfigValueError {
                    field: TIMEOUT_SECS_VAR.to_string(),
                    value: raw.clone(),
                    reason: format!("not a whole number of seconds: {}", e),
                }
            })?),
            None => None,
        };

        Ok(ConfigOverrides {
            endpoint_url: non_empty(ENDPOINT_URL_VAR),
            element_id: non_empty(ELEMENT_ID_VAR),
            request_timeout_secs,
            html_path: non_empty(HTML_PATH_VAR),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_reads_all_variables() {
        let overrides = EnvConfig::from_lookup(lookup(&[
            (ENDPOINT_URL_VAR, "https://abc.execute-api.eu-west-1.amazonaws.com/prod"),
            (ELEMENT_ID_VAR, "visitors"),
            (TIMEOUT_SECS_VAR, " 15 "),
            (HTML_PATH_VAR, "site/index.html"),
        ]))
        .unwrap();

        assert_eq!(
            overrides.endpoint_url.as_deref(),
            Some("https://abc.execute-api.eu-west-1.amazonaws.com/prod")
        );
        assert_eq!(overrides.element_id.as_deref(), Some("visitors"));
        assert_eq!(overrides.request_timeout_secs, Some(15));
        assert_eq!(overrides.html_path.as_deref(), Some("site/index.html"));
    }

    #[test]
    fn test_empty_variables_are_ignored() {
        let overrides = EnvConfig::from_lookup(lookup(&[(ENDPOINT_URL_VAR, "  ")])).unwrap();
        assert_eq!(overrides, ConfigOverrides::default());
    }

    #[test]
    fn test_bad_timeout_is_rejected() {
        let err = EnvConfig::from_lookup(lookup(&[(TIMEOUT_SECS_VAR, "soon")])).unwrap_err();
        assert!(matches!(err, CounterError::InvalidConfigValueError { .. }));
    }
}
