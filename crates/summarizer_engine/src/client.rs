use std::time::Duration;

use engine_logging::{engine_debug, engine_warn};
use serde::Serialize;
use serde_json::Value;

use crate::{FailureKind, SummarizeError, SummaryPayload};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ClientSettings {
    pub const DEFAULT_ENDPOINT: &'static str = "http://localhost:5000/summarize";
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            // The service downloads the article and runs a model before answering.
            request_timeout: Duration::from_secs(90),
        }
    }
}

#[async_trait::async_trait]
pub trait SummaryClient: Send + Sync {
    async fn summarize(&self, article_url: &str) -> Result<SummaryPayload, SummarizeError>;
}

#[derive(Serialize)]
struct SummarizeRequest<'a> {
    #[serde(rename = "articleUrl")]
    article_url: &'a str,
}

#[derive(Debug, Clone)]
pub struct ReqwestSummaryClient {
    settings: ClientSettings,
}

impl ReqwestSummaryClient {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, SummarizeError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| SummarizeError::new(FailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl SummaryClient for ReqwestSummaryClient {
    async fn summarize(&self, article_url: &str) -> Result<SummaryPayload, SummarizeError> {
        let client = self.build_client()?;

        let response = client
            .post(&self.settings.endpoint)
            .json(&SummarizeRequest { article_url })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        engine_debug!("summarize status={} body_len={}", status, body.len());

        classify_response(status, &body)
    }
}

/// Sorts a raw service response into a payload or a typed failure.
///
/// A 2xx body must carry `summary`, `key_points` and an `accuracy_score` in
/// 0..=100. Any body with a non-empty string `error` and no valid payload is a
/// service error; everything else is a transport-level failure.
pub fn classify_response(status: u16, body: &[u8]) -> Result<SummaryPayload, SummarizeError> {
    let success = (200..300).contains(&status);

    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(err) => {
            engine_warn!("summarize response is not JSON (status {}): {}", status, err);
            let kind = if success {
                FailureKind::MalformedPayload
            } else {
                FailureKind::HttpStatus(status)
            };
            return Err(SummarizeError::new(kind, err.to_string()));
        }
    };

    let service_error = value
        .get("error")
        .and_then(Value::as_str)
        .filter(|message| !message.trim().is_empty())
        .map(ToOwned::to_owned);

    if success {
        let parsed = serde_json::from_value::<SummaryPayload>(value);
        return match (parsed, service_error) {
            (Ok(payload), _) if payload.accuracy_score <= 100 => Ok(payload),
            (_, Some(message)) => Err(SummarizeError::new(FailureKind::Service { status }, message)),
            (Ok(payload), None) => Err(SummarizeError::new(
                FailureKind::MalformedPayload,
                format!("accuracy_score {} out of range", payload.accuracy_score),
            )),
            (Err(err), None) => Err(SummarizeError::new(
                FailureKind::MalformedPayload,
                err.to_string(),
            )),
        };
    }

    match service_error {
        Some(message) => Err(SummarizeError::new(FailureKind::Service { status }, message)),
        None => Err(SummarizeError::new(
            FailureKind::HttpStatus(status),
            format!("status {status} without error message"),
        )),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> SummarizeError {
    if err.is_timeout() {
        return SummarizeError::new(FailureKind::Timeout, err.to_string());
    }
    SummarizeError::new(FailureKind::Network, err.to_string())
}
