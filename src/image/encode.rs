//! JPEG encoding of normalized images.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{codecs::jpeg::JpegEncoder, DynamicImage};

use crate::error::{Error, Result};

use super::JPEG_MIME_TYPE;

/// A JPEG byte stream ready for transmission.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl NormalizedImage {
    /// Encoded JPEG bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        JPEG_MIME_TYPE
    }

    /// The payload as standard base64, the form inline image parts use.
    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// Write the JPEG to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}

/// Encode an image as JPEG at the given quality (1-100).
///
/// The image must already be in a mode the JPEG encoder accepts; run it
/// through [`super::normalize`] first.
///
/// # Errors
///
/// Returns an error if encoding fails.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<NormalizedImage> {
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
    image
        .write_with_encoder(encoder)
        .map_err(|source| Error::ImageEncode { source })?;

    tracing::debug!(
        "Encoded {}x{} JPEG at quality {quality}: {} bytes",
        image.width(),
        image.height(),
        bytes.len()
    );

    Ok(NormalizedImage {
        bytes,
        width: image.width(),
        height: image.height(),
    })
}
