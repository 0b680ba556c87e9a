//! Mapping request failures to user-facing messages.

use std::fmt;

/// Shown when the service rejects the API key.
pub const API_KEY_ERROR_MESSAGE: &str =
    "❌ **API Key Error**: Your API key appears to be invalid. Please check your configuration.";

/// Shown when the account is out of quota or rate limited.
pub const QUOTA_ERROR_MESSAGE: &str =
    "❌ **Quota Exceeded**: API usage limit reached. Please try again later.";

/// Broad category of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Invalid or unauthorized API key.
    Credential,
    /// Quota exhausted or rate limit hit.
    Quota,
    /// Anything else.
    Unclassified,
}

impl FailureKind {
    /// Classify an error message by keyword, case-insensitively.
    ///
    /// Credential keywords (`API_KEY`, `AUTHENTICATION`) are checked before
    /// quota keywords (`QUOTA`, `LIMIT`).
    #[must_use]
    pub fn classify(message: &str) -> Self {
        let upper = message.to_uppercase();
        if upper.contains("API_KEY") || upper.contains("AUTHENTICATION") {
            Self::Credential
        } else if upper.contains("QUOTA") || upper.contains("LIMIT") {
            Self::Quota
        } else {
            Self::Unclassified
        }
    }

    /// The message shown to the user for this kind of failure.
    #[must_use]
    pub fn user_message(self, detail: &str) -> String {
        match self {
            Self::Credential => API_KEY_ERROR_MESSAGE.to_string(),
            Self::Quota => QUOTA_ERROR_MESSAGE.to_string(),
            Self::Unclassified => format!("❌ **Error**: An unexpected error occurred: {detail}"),
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Credential => "credential",
            Self::Quota => "quota",
            Self::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_keywords() {
        assert_eq!(
            FailureKind::classify("400 API key not valid. [reason: API_KEY_INVALID]"),
            FailureKind::Credential
        );
        assert_eq!(FailureKind::classify("Authentication failed"), FailureKind::Credential);
        assert_eq!(FailureKind::classify("missing api_key"), FailureKind::Credential);
    }

    #[test]
    fn test_quota_keywords() {
        assert_eq!(
            FailureKind::classify("429 Resource has been exhausted (e.g. check quota)."),
            FailureKind::Quota
        );
        assert_eq!(FailureKind::classify("rate limit exceeded"), FailureKind::Quota);
    }

    #[test]
    fn test_credential_wins_over_quota() {
        assert_eq!(
            FailureKind::classify("API_KEY quota exceeded"),
            FailureKind::Credential
        );
    }

    #[test]
    fn test_unclassified() {
        // "API key" with a space is not a credential keyword.
        assert_eq!(FailureKind::classify("API key expired"), FailureKind::Unclassified);
        assert_eq!(FailureKind::classify("connection reset"), FailureKind::Unclassified);
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(FailureKind::Credential.user_message("ignored"), API_KEY_ERROR_MESSAGE);
        assert_eq!(FailureKind::Quota.user_message("ignored"), QUOTA_ERROR_MESSAGE);
        assert_eq!(
            FailureKind::Unclassified.user_message("boom"),
            "❌ **Error**: An unexpected error occurred: boom"
        );
    }
}
