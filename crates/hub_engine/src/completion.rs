use std::time::Duration;

use hub_logging::{hub_debug, hub_info, hub_warn};
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::wire::{GenerateRequest, GenerateResponse};
use crate::CompletionError;

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-preview-09-2025:generateContent";

#[derive(Debug, Clone)]
pub struct CompletionSettings {
    /// Parsed when the client is built.
    pub endpoint: String,
    /// Injected by the hosting environment; blank counts as missing.
    pub api_key: Option<String>,
    /// `None` waits for the upstream indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            api_key: None,
            request_timeout: None,
        }
    }
}

impl CompletionSettings {
    fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// One-shot prompt completion. Calls are independent: no retry, no
/// coalescing, no ordering between concurrent calls.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    settings: CompletionSettings,
    endpoint: Url,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(settings: CompletionSettings) -> Result<Self, CompletionError> {
        let endpoint = Url::parse(settings.endpoint.trim())
            .map_err(|err| CompletionError::InvalidEndpoint(err.to_string()))?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| CompletionError::Transport(err.to_string()))?;
        Ok(Self {
            settings,
            endpoint,
            client,
        })
    }

    pub fn has_credential(&self) -> bool {
        self.settings.credential().is_some()
    }
}

#[async_trait::async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, CompletionError> {
        let Some(key) = self.settings.credential() else {
            hub_warn!("Completion skipped: no API key configured");
            return Err(CompletionError::MissingCredential);
        };

        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("key", key);
        let body = serde_json::to_vec(&GenerateRequest::from_prompt(prompt))
            .map_err(|err| CompletionError::Transport(err.to_string()))?;

        hub_info!(
            "Completion request to {} prompt_len={}",
            self.endpoint,
            prompt.len()
        );
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            hub_warn!("Completion failed with status {}", status);
            return Err(CompletionError::UpstreamStatus(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        let parsed: GenerateResponse = serde_json::from_slice(&bytes)
            .map_err(|err| CompletionError::InvalidBody(err.to_string()))?;
        let text = parsed.into_first_text().unwrap_or_else(|| {
            hub_debug!("Completion response carried no text; treating as empty");
            String::new()
        });
        Ok(text)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> CompletionError {
    // The URL carries the key as a query parameter; keep it out of messages.
    let err = err.without_url();
    if err.is_timeout() {
        return CompletionError::Timeout(err.to_string());
    }
    CompletionError::Transport(err.to_string())
}
