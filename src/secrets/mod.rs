//! API key loading and validation.
//!
//! The inference service needs a single secret, `GEMINI_API_KEY`. It is read
//! once at startup from a TOML secrets file or the environment and then
//! only ever handed out as a [`Credential`].

mod credential;
mod store;

pub use credential::Credential;
pub use store::{SecretSource, SecretStore};

/// Name of the secret, both as TOML key and environment variable.
pub const API_KEY_NAME: &str = "GEMINI_API_KEY";

/// Value shipped in sample secrets files; never a real key.
pub const PLACEHOLDER_API_KEY: &str = "your-gemini-api-key-here";

/// Shown instead of any analysis when no usable key is configured.
pub const SETUP_INSTRUCTIONS: &str = "\
🔑 **API Key Not Configured**

To use this tool, you need to configure your Google Gemini API key:

**Secrets file:**
1. Create a file `.streamlit/secrets.toml` in your working directory
   (or pass another file with `--secrets`)
2. Add: `GEMINI_API_KEY = \"your-api-key-here\"`

**Environment:**
1. Export `GEMINI_API_KEY=your-api-key-here`

**Get your free API key at:** [Google AI Studio](https://aistudio.google.com/app/apikey)
";
