//! Check-up configuration.

use crate::diagnosis::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::error::{Error, Result};
use crate::image::{JPEG_QUALITY, MAX_IMAGE_SIZE};

/// Configuration for a [`super::Doctor`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini model name.
    pub model: String,

    /// API root, without the `/models/...` suffix.
    pub base_url: String,

    /// Largest width or height sent to the model.
    pub max_dimension: u32,

    /// JPEG quality of the transmitted image (1-100).
    pub jpeg_quality: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_dimension: MAX_IMAGE_SIZE,
            jpeg_quality: JPEG_QUALITY,
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(Error::InvalidParameter {
                name: "model".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(Error::InvalidParameter {
                name: "base_url".to_string(),
                reason: "must be an http(s) URL".to_string(),
            });
        }

        if self.max_dimension == 0 {
            return Err(Error::InvalidParameter {
                name: "max_dimension".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(Error::InvalidParameter {
                name: "jpeg_quality".to_string(),
                reason: "must be between 1 and 100".to_string(),
            });
        }

        Ok(())
    }
}
