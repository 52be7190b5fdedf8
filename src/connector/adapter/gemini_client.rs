use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::ChatClient;
use crate::domain::{ChatPrompt, DomainError, PromptEntry, PromptRole};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const MODELS_PATH: &str = "/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Gemini `generateContent` request payload.
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Minimal subset of the `generateContent` response we care about.
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Connection settings for [`GeminiClient`].
///
/// | Variable          | Default                                     |
/// |-------------------|---------------------------------------------|
/// | `GEMINI_API_KEY`  | none; calls fail until it is set            |
/// | `GEMINI_MODEL`    | `gemini-2.0-flash`                          |
/// | `GEMINI_BASE_URL` | `https://generativelanguage.googleapis.com` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl GeminiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            api_key: get("GEMINI_API_KEY"),
            model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: get("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// HTTP client for the Gemini `generateContent` endpoint.
///
/// The system instruction travels as the first `user` entry of `contents`,
/// followed by the history and the triggering question. Assistant turns use the
/// `model` role.
///
/// A missing API key is not an error at construction time: the client is built
/// anyway and every call fails with [`DomainError::ExternalService`].
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    /// Full endpoint URL (base + models path + `:generateContent`).
    url: String,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        let url = format!(
            "{}{}/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            MODELS_PATH,
            config.model
        );
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                warn!(
                    "Failed to build HTTP client with {:?} timeout, using defaults: {}",
                    REQUEST_TIMEOUT, e
                );
                reqwest::Client::new()
            });
        Self {
            client,
            api_key: config.api_key,
            model: config.model,
            url,
        }
    }

    pub fn from_env() -> Self {
        Self::new(GeminiConfig::from_env())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn wire_role(role: PromptRole) -> &'static str {
        match role {
            PromptRole::System | PromptRole::User => "user",
            PromptRole::Assistant => "model",
        }
    }

    fn build_request(entries: &[PromptEntry]) -> GenerateContentRequest<'_> {
        GenerateContentRequest {
            contents: entries
                .iter()
                .map(|e| Content {
                    role: Self::wire_role(e.role),
                    parts: vec![Part { text: &e.content }],
                })
                .collect(),
        }
    }

    fn extract_text(response: GenerateContentResponse) -> Result<String, DomainError> {
        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(DomainError::external(
                "GeminiClient: response contained no text",
            ));
        }
        Ok(text)
    }

    fn error_message(body: &str) -> String {
        serde_json::from_str::<ErrorWrapper>(body)
            .ok()
            .and_then(|w| match (w.error.status, w.error.message) {
                (Some(status), Some(message)) => Some(format!("{status}: {message}")),
                (None, Some(message)) => Some(message),
                (Some(status), None) => Some(status),
                (None, None) => None,
            })
            .unwrap_or_else(|| body.trim().to_string())
    }
}

#[async_trait]
impl ChatClient for GeminiClient {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, DomainError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            DomainError::external("GeminiClient: GEMINI_API_KEY is not set")
        })?;

        let entries = prompt.entries();
        let request = Self::build_request(&entries);

        debug!("GeminiClient: POST {} ({} contents)", self.url, request.contents.len());

        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::external(format!("GeminiClient: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("GeminiClient: API returned {status}: {body}");
            return Err(DomainError::external(format!(
                "GeminiClient: API returned {status}: {}",
                Self::error_message(&body)
            )));
        }

        let api_response: GenerateContentResponse = response.json().await.map_err(|e| {
            DomainError::external(format!("GeminiClient: failed to parse response: {e}"))
        })?;

        Self::extract_text(api_response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
