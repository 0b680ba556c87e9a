//! Image loading utilities.

use std::path::Path;

use image::{DynamicImage, ImageError, ImageFormat};

use crate::error::{Error, Result};

/// Load an image from disk.
///
/// The format is detected from the file contents, not the extension. Only
/// JPEG, PNG and WEBP are accepted.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not an accepted format,
/// or fails to decode.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();

    let bytes = std::fs::read(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source: ImageError::IoError(source),
    })?;

    let format = accepted_format(&bytes)?;
    let img = image::load_from_memory_with_format(&bytes, format).map_err(|source| {
        Error::ImageLoad {
            path: path.to_path_buf(),
            source,
        }
    })?;

    tracing::debug!(
        "Loaded {format:?} image {}x{} ({:?}) from {}",
        img.width(),
        img.height(),
        img.color(),
        path.display()
    );

    Ok(img)
}

/// Decode an image held in memory, e.g. an upload or a camera capture.
///
/// # Errors
///
/// Returns an error if the bytes are not an accepted format or fail to decode.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    let format = accepted_format(bytes)?;
    image::load_from_memory_with_format(bytes, format).map_err(|source| Error::ImageDecode { source })
}

/// Sniff the container format and reject anything but JPEG, PNG and WEBP.
fn accepted_format(bytes: &[u8]) -> Result<ImageFormat> {
    match image::guess_format(bytes) {
        Ok(format @ (ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::WebP)) => Ok(format),
        Ok(other) => Err(Error::UnsupportedFormat {
            format: format!("{other:?}"),
        }),
        Err(_) => Err(Error::UnsupportedFormat {
            format: "unknown".to_string(),
        }),
    }
}
