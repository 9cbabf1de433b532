use crate::adapters::http::build_client;
use crate::core::{BodyKind, ConfigProvider, ContractReport};
use crate::utils::error::{ContractViolation, Result};
use reqwest::Client;
use serde_json::Value;

/// 驗證計數端點的回應契約：HTTP 200、本文非 null、本文為字串
pub struct ContractCheck {
    endpoint_url: String,
    client: Client,
}

impl ContractCheck {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Ok(Self {
            endpoint_url: config.endpoint_url().to_string(),
            client: build_client(config.request_timeout())?,
        })
    }

    pub async fn run(&self) -> Result<ContractReport> {
        tracing::debug!("Contract check GET {}", self.endpoint_url);
        let response = self.client.get(&self.endpoint_url).send().await?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(ContractViolation::UnexpectedStatus { status }.into());
        }

        let body = response.text().await?;
        let body_kind = check_body(&body)?;

        tracing::info!(
            "✅ Contract check passed: HTTP {} with {:?} body",
            status,
            body_kind
        );

        Ok(ContractReport {
            endpoint_url: self.endpoint_url.clone(),
            status,
            body_kind,
            body,
        })
    }
}

/// Body rules, split out from the request so they can be checked directly.
///
/// The body is decoded as JSON whatever the content type says; only a body
/// that is not JSON at all is taken as raw text.
pub fn check_body(body: &str) -> Result<BodyKind> {
    if body.trim().is_empty() {
        return Err(ContractViolation::NullBody.into());
    }

    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(_)) => Ok(BodyKind::JsonString),
        Ok(Value::Null) => Err(ContractViolation::NullBody.into()),
        Ok(other) => Err(ContractViolation::NotAString {
            kind: json_kind(&other).to_string(),
        }
        .into()),
        Err(_) => Ok(BodyKind::Text),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
