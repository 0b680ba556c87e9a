//! Colour-mode conversion and bounded resizing.

use image::{imageops::FilterType, DynamicImage};

/// Make an image safe to JPEG-encode and bound its size.
///
/// Images with an alpha channel (including palette PNGs, which the decoder
/// expands to RGBA) or with more than 8 bits per channel are converted to
/// RGB8. 8-bit RGB and greyscale pass through untouched.
///
/// If either side exceeds `max_dimension` the image is scaled down with
/// Lanczos3 so that both sides fit, keeping the aspect ratio. Smaller images
/// are never enlarged.
#[must_use]
pub fn normalize(image: DynamicImage, max_dimension: u32) -> DynamicImage {
    let image = match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_) => image,
        other => {
            tracing::debug!("Converting {:?} image to RGB", other.color());
            DynamicImage::ImageRgb8(other.to_rgb8())
        }
    };

    let (width, height) = (image.width(), image.height());
    if width <= max_dimension && height <= max_dimension {
        return image;
    }

    let resized = image.resize(max_dimension, max_dimension, FilterType::Lanczos3);
    tracing::debug!(
        "Resized image from {width}x{height} to {}x{}",
        resized.width(),
        resized.height()
    );
    resized
}
