//! Sending a normalized leaf photo for diagnosis.
//!
//! The requester never propagates failures: whatever goes wrong is turned
//! into a [`Diagnosis::Failed`] carrying a fixed user-facing message.

mod classify;
mod client;
mod gemini;
mod prompt;

use std::fmt;

pub use classify::{FailureKind, API_KEY_ERROR_MESSAGE, QUOTA_ERROR_MESSAGE};
pub use client::{InferenceClient, InferenceRequest};
pub use gemini::{GeminiClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use prompt::{MAX_OUTPUT_TOKENS, SYSTEM_PROMPT, TEMPERATURE};

use crate::error::Error;
use crate::image::NormalizedImage;
use crate::secrets::Credential;

/// Outcome of one analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnosis {
    /// The model's report, verbatim.
    Report(String),
    /// The request failed; `message` is what the user sees.
    Failed { kind: FailureKind, message: String },
}

impl Diagnosis {
    /// Classify an error into a user-facing failure.
    #[must_use]
    pub fn from_error(err: &Error) -> Self {
        let detail = err.to_string();
        let kind = FailureKind::classify(&detail);
        Self::Failed {
            kind,
            message: kind.user_message(&detail),
        }
    }

    #[must_use]
    pub const fn is_report(&self) -> bool {
        matches!(self, Self::Report(_))
    }

    /// The Markdown text to render.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Report(text) => text,
            Self::Failed { message, .. } => message,
        }
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Sends images with the fixed instruction and sampling parameters.
///
/// Requires a [`Credential`], so a requester cannot exist without a
/// validated key.
pub struct Requester<C> {
    client: C,
    credential: Credential,
}

impl<C: InferenceClient> Requester<C> {
    #[must_use]
    pub fn new(client: C, credential: Credential) -> Self {
        Self { client, credential }
    }

    /// Ask the model for a diagnosis. One attempt, no retries.
    #[must_use]
    pub fn diagnose(&self, image: &NormalizedImage) -> Diagnosis {
        let request = InferenceRequest {
            instruction: SYSTEM_PROMPT,
            image,
            temperature: TEMPERATURE,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        };

        match self.client.generate(&self.credential, &request) {
            Ok(text) => {
                tracing::info!("Received diagnosis ({} chars)", text.chars().count());
                Diagnosis::Report(text)
            }
            Err(err) => {
                let diagnosis = Diagnosis::from_error(&err);
                if let Diagnosis::Failed { kind, .. } = &diagnosis {
                    tracing::warn!("Diagnosis request failed ({kind}): {err}");
                }
                diagnosis
            }
        }
    }

    /// The underlying client.
    pub const fn client(&self) -> &C {
        &self.client
    }
}
