use crate::utils::error::{CounterError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// 端點回傳的計數值
///
/// The wire format is "a JSON value coercible to display text": the live
/// endpoint sends a JSON string such as `"42"`, but a bare number is
/// accepted too. Only `null` is rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct Count(Value);

impl Count {
    pub fn from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            return Err(CounterError::decode("count is null"));
        }
        Ok(Self(value))
    }

    /// 解析回應本文
    pub fn from_body(body: &str) -> Result<Self> {
        if body.trim().is_empty() {
            return Err(CounterError::decode("response body is empty"));
        }
        let value: Value =
            serde_json::from_str(body).map_err(|e| CounterError::decode(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Text written into the display surface.
    pub fn display_text(&self) -> String {
        match &self.0 {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for Count {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_text())
    }
}

#[derive(Debug, Clone)]
pub struct FetchedCount {
    pub count: Count,
    pub status: u16,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    /// JSON response whose value is a string
    JsonString,
    /// Non-JSON response, taken as raw text
    Text,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContractReport {
    pub endpoint_url: String,
    pub status: u16,
    pub body_kind: BodyKind,
    pub body: String,
}
