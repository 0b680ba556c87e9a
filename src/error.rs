//! Custom error types for green-doctor.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the green-doctor library.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to load an image file.
    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to decode in-memory image bytes.
    #[error("failed to decode image: {source}")]
    ImageDecode {
        #[source]
        source: image::ImageError,
    },

    /// Failed to encode the normalized image.
    #[error("failed to encode image as JPEG: {source}")]
    ImageEncode {
        #[source]
        source: image::ImageError,
    },

    /// The input is not one of the accepted image formats.
    #[error("unsupported image format {format}: expected JPEG, PNG or WEBP")]
    UnsupportedFormat { format: String },

    /// Failed to read a secrets file.
    #[error("failed to read secrets file {path}: {source}")]
    SecretsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A secrets file is not valid TOML or holds a non-string key.
    #[error("secrets file {path} is not valid: {source}")]
    SecretsParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// No usable API key was configured.
    #[error("{name} is not configured")]
    MissingCredential { name: &'static str },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The HTTP request could not be completed.
    #[error("request to inference service failed: {source}")]
    Http {
        #[source]
        source: reqwest::Error,
    },

    /// The inference service answered with an error status.
    #[error("inference service returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The inference service answered without any text.
    #[error("inference service returned no text (finish reason: {})", finish_reason.as_deref().unwrap_or("unknown"))]
    EmptyResponse { finish_reason: Option<String> },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the user should be shown the setup instructions.
    ///
    /// True for a missing or placeholder key and for a secrets file that
    /// exists but does not parse, or holds a non-string key.
    #[must_use]
    pub const fn needs_setup(&self) -> bool {
        matches!(self, Self::MissingCredential { .. } | Self::SecretsParse { .. })
    }
}

/// Result type alias for green-doctor operations.
pub type Result<T> = std::result::Result<T, Error>;
