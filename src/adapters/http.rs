use crate::domain::fault::{ProviderFault, ProviderResult};
use crate::utils::error::{Result, ScoutError};
use crate::utils::validation::validate_url;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;
use url::Url;

pub(crate) const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Settings shared by every provider client.
#[derive(Debug, Clone, Default)]
pub struct HttpSettings {
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl HttpSettings {
    pub fn with_timeout_seconds(timeout_seconds: Option<u64>) -> Self {
        Self {
            timeout: timeout_seconds.map(Duration::from_secs),
            user_agent: None,
        }
    }

    pub(crate) fn build_client(&self) -> Result<Client> {
        let mut builder =
            Client::builder().user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

pub(crate) fn parse_endpoint(field_name: &str, endpoint: &str) -> Result<Url> {
    validate_url(field_name, endpoint)?;
    Url::parse(endpoint).map_err(|e| ScoutError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: endpoint.to_string(),
        reason: e.to_string(),
    })
}

/// Appends path segments to a base endpoint, keeping whatever path it
/// already has.
pub(crate) fn join_segments(base: &Url, segments: &[&str]) -> ProviderResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ProviderFault::transport(format!("endpoint {} cannot carry a path", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Sends the request and decodes a JSON body, mapping every failure onto
/// a provider fault.
pub(crate) async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> ProviderResult<T> {
    let response = request
        .send()
        .await
        .map_err(|e| ProviderFault::from_reqwest(&e))?;

    let status = response.status();
    tracing::debug!("Provider response status: {} ({})", status, response.url());

    if !status.is_success() {
        return Err(ProviderFault::status(format!(
            "HTTP {} from {}",
            status,
            response.url()
        )));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| ProviderFault::from_reqwest(&e))?;

    serde_json::from_slice(&body).map_err(|e| ProviderFault::malformed(e.to_string()))
}

/// Accepts `"-22.9"` as well as `-22.9` and keeps the textual form.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

pub(crate) fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
