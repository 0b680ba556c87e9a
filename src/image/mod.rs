//! Image loading, normalization, and encoding utilities.
//!
//! Every photo goes through the same steps before it is sent for diagnosis:
//! decode, drop any alpha channel, shrink to fit inside
//! [`MAX_IMAGE_SIZE`]x[`MAX_IMAGE_SIZE`], and re-encode as JPEG.

mod encode;
mod load;
mod normalize;

pub use encode::{encode_jpeg, NormalizedImage};
pub use load::{decode_image, load_image};
pub use normalize::normalize;

use image::DynamicImage;

use crate::error::Result;

/// Largest width or height sent to the inference service.
pub const MAX_IMAGE_SIZE: u32 = 800;

/// JPEG quality used for transmission.
pub const JPEG_QUALITY: u8 = 85;

/// MIME type of the encoded payload.
pub const JPEG_MIME_TYPE: &str = "image/jpeg";

/// Normalize an image and encode it for transmission.
///
/// # Errors
///
/// Returns an error if JPEG encoding fails.
pub fn prepare(image: DynamicImage, max_dimension: u32, quality: u8) -> Result<NormalizedImage> {
    let normalized = normalize(image, max_dimension);
    encode_jpeg(&normalized, quality)
}
