//! Google Gemini `generateContent` client.

use std::fmt::Write as _;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::secrets::Credential;

use super::client::{InferenceClient, InferenceRequest};

/// Public Gemini REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Fast, cheap vision model.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Header carrying the API key. Keeps the key out of URLs and error text.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Longest slice of a non-JSON error body kept in error messages.
const MAX_ERROR_BODY: usize = 500;

/// Blocking client for the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a client for `model` against the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new<S: Into<String>>(model: S) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| Error::Http { source })?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
        })
    }

    /// Point the client at another API root, e.g. a proxy or a test server.
    #[must_use]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl InferenceClient for GeminiClient {
    fn generate(&self, credential: &Credential, request: &InferenceRequest<'_>) -> Result<String> {
        let url = self.endpoint();
        let body = GenerateContentRequest::new(request);

        tracing::debug!(
            "POST {url} ({} byte image, temperature {}, max {} tokens)",
            request.image.bytes().len(),
            request.temperature,
            request.max_output_tokens
        );

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, credential.expose())
            .json(&body)
            .send()
            .map_err(|source| Error::Http { source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: api_error_message(status, &body),
            });
        }

        let parsed: GenerateContentResponse =
            response.json().map_err(|source| Error::Http { source })?;
        parsed.into_text()
    }
}

/// Build a readable message from a Gemini error body.
///
/// Gemini puts the machine-readable cause in `error.details[].reason`
/// (e.g. `API_KEY_INVALID`) and `error.status` (e.g. `RESOURCE_EXHAUSTED`);
/// both are appended so keyword classification can see them.
fn api_error_message(status: StatusCode, body: &str) -> String {
    let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) else {
        let body = body.trim();
        if body.is_empty() {
            return status.canonical_reason().unwrap_or_default().to_string();
        }
        return body.chars().take(MAX_ERROR_BODY).collect();
    };

    let error = envelope.error;
    let mut message = error.message;
    if let Some(code) = error.status {
        let _ = write!(message, " [status: {code}]");
    }
    for reason in error.details.into_iter().filter_map(|detail| detail.reason) {
        let _ = write!(message, " [reason: {reason}]");
    }
    message
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(request: &InferenceRequest<'a>) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    Part {
                        text: Some(request.instruction),
                        inline_data: None,
                    },
                    Part {
                        text: None,
                        inline_data: Some(Blob {
                            mime_type: request.image.mime_type(),
                            data: request.image.to_base64(),
                        }),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Part<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<Blob>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Blob {
    mime_type: &'static str,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Concatenate the text parts of the first candidate.
    fn into_text(self) -> Result<String> {
        let block_reason = self.prompt_feedback.and_then(|feedback| feedback.block_reason);

        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(Error::EmptyResponse {
                finish_reason: block_reason,
            });
        };

        let text: String = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if text.trim().is_empty() {
            return Err(Error::EmptyResponse {
                finish_reason: candidate.finish_reason.or(block_reason),
            });
        }

        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    status: Option<String>,
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    reason: Option<String>,
}
