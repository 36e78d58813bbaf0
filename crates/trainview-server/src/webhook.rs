use serde_json::Value;
use std::time::Duration;

use crate::constants::webhook;

/// Client for the fixed local extraction/training service.
///
/// The service answers a POST with a body that may or may not be JSON; a
/// JSON object carrying a "job" key means it kicked off an asynchronous job
/// and the caller should re-read the source file once the call returns.
#[derive(Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
    base: String,
    token: Option<String>,
}

impl WebhookClient {
    pub fn new(token: Option<String>) -> reqwest::Result<Self> {
        Self::with_base(
            format!("http://{}:{}", webhook::HOST, webhook::PORT),
            token,
        )
    }

    /// Same client against a different base URL. Used by tests pointing at a
    /// stub service.
    pub fn with_base(base: impl Into<String>, token: Option<String>) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(webhook::TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base: base.into(),
            token,
        })
    }

    /// POST to the given webhook path with the verification token. The body
    /// is parsed as JSON when possible; anything else comes back as a plain
    /// JSON string.
    pub async fn trigger(&self, path: &str) -> reqwest::Result<Value> {
        let url = format!(
            "{}{}?verify_token={}",
            self.base,
            path,
            self.token.as_deref().unwrap_or_default(),
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(String::new())
            .send()
            .await?;

        let raw = response.text().await?;
        Ok(serde_json::from_str(&raw).unwrap_or(Value::String(raw)))
    }

    /// True when the service reports it started an asynchronous job.
    pub fn job_started(response: &Value) -> bool {
        response.get("job").is_some()
    }
}
