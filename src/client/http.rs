//! HTTP execution client
//!
//! Sends exactly one multipart POST per invocation to the tool-addressed
//! backend route and never retries; resubmission is a user decision because
//! the backend is not guaranteed idempotent.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};

use crate::error::{BotdeskError, Result};

use super::BotClient;
use super::request::InvocationRequest;

/// Multipart key the attachment is sent under
const ATTACHMENT_PART: &str = "file";

/// JSON key holding the textual result in a structured response body
const RESULT_KEY: &str = "result";

/// Default backend timeout; cold-starting instances can take a while
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Backend base URL, e.g. `https://bots.example.edu`
    pub base_url: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl HttpClientConfig {
    /// Create a config for a specific backend
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// Execution client backed by the HTTP bot endpoint
#[derive(Debug)]
pub struct HttpBotClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpBotClient {
    /// Create a new client
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BotdeskError::Invocation(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Backend route for a tool, derived deterministically from its id
    fn route(&self, tool_id: &str) -> String {
        format!("{}/bot/{}", self.config.base_url.trim_end_matches('/'), tool_id)
    }

    /// Build the multipart form: one text part per field, plus the
    /// attachment (if any) as a binary part under a fixed key
    fn build_form(request: &InvocationRequest) -> Form {
        let mut form = Form::new();
        for (name, value) in &request.fields {
            form = form.text(name.clone(), value.clone());
        }
        if let Some(attachment) = &request.attachment {
            let part = Part::bytes(attachment.bytes.clone()).file_name(attachment.file_name.clone());
            form = form.part(ATTACHMENT_PART, part);
        }
        form
    }

    /// Extract the textual result from a 2xx body.
    ///
    /// A JSON object with a string under the result key yields that string;
    /// anything else (plain text, JSON without the key, non-string value)
    /// falls back to the raw body. The fallback is tolerated behavior, not
    /// an error: the backend contract allows unstructured responses.
    fn extract_result(body: &str) -> String {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
            if let Some(result) = value.get(RESULT_KEY).and_then(|r| r.as_str()) {
                return result.to_string();
            }
        }
        body.to_string()
    }

    /// Human-readable reason for a transport failure
    fn transport_reason(e: &reqwest::Error) -> String {
        if e.is_timeout() {
            "request timed out; the backend may still be starting up".to_string()
        } else if e.is_connect() {
            format!("could not reach the backend: {}", e)
        } else {
            format!("request failed: {}", e)
        }
    }

    /// Configured base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

#[async_trait]
impl BotClient for HttpBotClient {
    async fn invoke(&self, request: &InvocationRequest) -> Result<String> {
        let url = self.route(&request.tool_id);
        log::info!(
            "invoking '{}' at {} ({} fields, attachment: {})",
            request.tool_id,
            url,
            request.fields.len(),
            request.attachment.is_some()
        );

        let response = self
            .client
            .post(&url)
            .header("accept", "application/json")
            .multipart(Self::build_form(request))
            .send()
            .await
            .map_err(|e| BotdeskError::Invocation(Self::transport_reason(&e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BotdeskError::Invocation(format!("failed to read response body: {}", e)))?;

        if !status.is_success() {
            let snippet: String = body.chars().take(200).collect();
            return Err(BotdeskError::Invocation(format!(
                "backend returned {}: {}",
                status, snippet
            )));
        }

        Ok(Self::extract_result(&body))
    }
}
