//! HTTP access to the Open-Meteo geocoding and forecast services.

use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;

use crate::{Config, config::Endpoints, error::WeatherError};

pub mod forecast;
pub mod geocoding;

const USER_AGENT: &str = concat!("skyview/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    endpoints: Endpoints,
}

/// Error payload Open-Meteo sends alongside 4xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

impl WeatherClient {
    pub fn new(endpoints: Endpoints, timeout: Option<Duration>) -> Result<Self, WeatherError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self { http: builder.build()?, endpoints })
    }

    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        Self::new(config.endpoints.clone(), config.timeout())
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        service: &'static str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        tracing::debug!(service, url, "sending request");

        let res = self.http.get(url).query(query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Status { service, status, reason: error_reason(&body) });
        }

        if let Ok(ApiErrorBody { error: true, reason }) = serde_json::from_str::<ApiErrorBody>(&body) {
            return Err(WeatherError::malformed(
                service,
                reason.unwrap_or_else(|| "error flag set without a reason".to_string()),
            ));
        }

        serde_json::from_str(&body).map_err(|e| WeatherError::malformed(service, e.to_string()))
    }
}

fn error_reason(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody { reason: Some(reason), .. }) => reason,
        _ => truncate_body(body),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_reason_prefers_api_reason() {
        let body = r#"{"error":true,"reason":"Cannot initialize WeatherVariable from invalid String value"}"#;
        assert_eq!(
            error_reason(body),
            "Cannot initialize WeatherVariable from invalid String value"
        );
    }

    #[test]
    fn error_reason_falls_back_to_body() {
        assert_eq!(error_reason("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "é".repeat(150);
        let out = truncate_body(&body);
        assert!(out.ends_with("..."));
        assert!(out.len() <= 203);
    }

    #[test]
    fn builds_from_config() {
        let cfg = Config { timeout_secs: Some(3), ..Config::default() };
        let client = WeatherClient::from_config(&cfg).expect("client");
        assert_eq!(client.endpoints(), &cfg.endpoints);
    }
}
