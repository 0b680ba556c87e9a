//! The linear check-up: credential, normalize, request, report.

mod config;

pub use config::Config;

use image::DynamicImage;

use crate::diagnosis::{Diagnosis, GeminiClient, InferenceClient, Requester};
use crate::error::Result;
use crate::image::NormalizedImage;
use crate::secrets::{Credential, SecretStore};

/// Result of examining one photo.
#[derive(Debug)]
pub struct Examination {
    /// What was sent, if normalization succeeded.
    pub normalized: Option<NormalizedImage>,
    pub diagnosis: Diagnosis,
}

/// Ties the image normalizer to the diagnosis requester.
pub struct Doctor<C> {
    config: Config,
    requester: Requester<C>,
}

impl Doctor<GeminiClient> {
    /// Create a doctor backed by the Gemini API.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: Config, credential: Credential) -> Result<Self> {
        let client = GeminiClient::new(config.model.clone())?.with_base_url(config.base_url.clone());
        Self::with_client(config, client, credential)
    }
}

impl<C: InferenceClient> Doctor<C> {
    /// Create a doctor with any inference client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_client(config: Config, client: C, credential: Credential) -> Result<Self> {
        config.validate()?;

        tracing::info!("Initializing with config: {config:?}");

        Ok(Self {
            config,
            requester: Requester::new(client, credential),
        })
    }

    /// Look up the credential in `store` before anything else.
    ///
    /// A missing or placeholder key fails here, so no request can ever be
    /// made without one.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MissingCredential`] if no usable key is
    /// configured, or a secrets file / configuration error.
    pub fn from_store(config: Config, store: &SecretStore, client: C) -> Result<Self> {
        let credential = store.credential()?;
        Self::with_client(config, client, credential)
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Normalize and encode an image the way it will be sent.
    ///
    /// # Errors
    ///
    /// Returns an error if JPEG encoding fails.
    pub fn prepare(&self, image: DynamicImage) -> Result<NormalizedImage> {
        tracing::info!(
            "Normalizing {}x{} image ({:?})",
            image.width(),
            image.height(),
            image.color()
        );
        crate::image::prepare(image, self.config.max_dimension, self.config.jpeg_quality)
    }

    /// Request a diagnosis for an already prepared image.
    #[must_use]
    pub fn diagnose(&self, image: &NormalizedImage) -> Diagnosis {
        tracing::info!(
            "Requesting diagnosis for {}x{} JPEG ({} bytes)",
            image.width(),
            image.height(),
            image.bytes().len()
        );
        self.requester.diagnose(image)
    }

    /// Prepare an image and request a diagnosis.
    ///
    /// Never fails: an encoding error is reported like any other request
    /// failure.
    #[must_use]
    pub fn examine(&self, image: DynamicImage) -> Examination {
        match self.prepare(image) {
            Ok(normalized) => {
                let diagnosis = self.diagnose(&normalized);
                Examination {
                    normalized: Some(normalized),
                    diagnosis,
                }
            }
            Err(err) => {
                tracing::warn!("Failed to prepare image: {err}");
                Examination {
                    normalized: None,
                    diagnosis: Diagnosis::from_error(&err),
                }
            }
        }
    }
}
