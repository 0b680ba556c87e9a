//! Validated API key with redacted output.

use std::fmt;

use zeroize::Zeroize;

use crate::error::{Error, Result};

use super::{API_KEY_NAME, PLACEHOLDER_API_KEY};

/// An API key that has passed validation.
///
/// The only way to obtain one is [`Credential::new`], so holding a
/// `Credential` means the key is non-empty and not the placeholder. The
/// value never shows up in `Debug` or `Display` output and is wiped on drop.
#[derive(Clone)]
pub struct Credential {
    inner: String,
}

impl Credential {
    /// Validate a raw key. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] if the key is blank or still the
    /// placeholder value.
    pub fn new(raw: &str) -> Result<Self> {
        let key = raw.trim();
        if key.is_empty() || key == PLACEHOLDER_API_KEY {
            return Err(Error::MissingCredential { name: API_KEY_NAME });
        }

        Ok(Self {
            inner: key.to_string(),
        })
    }

    /// The key value, for the request header only.
    #[inline]
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.inner
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential([REDACTED])")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED API KEY]")
    }
}

impl Drop for Credential {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}
