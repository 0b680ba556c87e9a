//! Seam between the requester and the remote model.

use crate::error::Result;
use crate::image::NormalizedImage;
use crate::secrets::Credential;

/// One multimodal generation call.
#[derive(Debug, Clone, Copy)]
pub struct InferenceRequest<'a> {
    /// Instruction text, sent before the image.
    pub instruction: &'a str,
    /// JPEG payload.
    pub image: &'a NormalizedImage,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// A vision-capable model that turns an instruction plus an image into text.
pub trait InferenceClient {
    /// Run one generation and return the model's raw text.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails for any reason. Callers classify
    /// the error by its message.
    fn generate(&self, credential: &Credential, request: &InferenceRequest<'_>) -> Result<String>;
}

impl<C: InferenceClient + ?Sized> InferenceClient for &C {
    fn generate(&self, credential: &Credential, request: &InferenceRequest<'_>) -> Result<String> {
        (**self).generate(credential, request)
    }
}
