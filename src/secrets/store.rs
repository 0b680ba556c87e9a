//! Secret lookup across secrets files and the environment.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

use super::{Credential, API_KEY_NAME};

/// Where the API key was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretSource {
    /// A TOML secrets file.
    File(PathBuf),
    /// The `GEMINI_API_KEY` environment variable.
    Environment,
}

impl fmt::Display for SecretSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Environment => write!(f, "${API_KEY_NAME}"),
        }
    }
}

/// Layout of a secrets file. Other keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct SecretsFile {
    #[serde(rename = "GEMINI_API_KEY")]
    gemini_api_key: Option<String>,
}

/// Ordered set of places to look for the API key.
///
/// An explicit file must exist; search paths are skipped when missing. Files
/// are consulted before the environment, and the first source that defines
/// the key wins even if its value turns out to be unusable.
#[derive(Debug, Clone, Default)]
pub struct SecretStore {
    explicit: Option<PathBuf>,
    search_paths: Vec<PathBuf>,
    env_value: Option<String>,
}

impl SecretStore {
    /// Build the store used by the CLI.
    ///
    /// Search order:
    /// 1. `explicit`, if given
    /// 2. `.streamlit/secrets.toml` in the working directory
    /// 3. `.streamlit/secrets.toml` in the home directory
    /// 4. `green-doctor/secrets.toml` in the platform config directory
    /// 5. the `GEMINI_API_KEY` environment variable
    #[must_use]
    pub fn discover(explicit: Option<PathBuf>) -> Self {
        Self {
            explicit,
            search_paths: default_search_paths(dirs::home_dir(), dirs::config_dir()),
            env_value: std::env::var(API_KEY_NAME).ok(),
        }
    }

    /// A store that only reads one file, which must exist.
    #[must_use]
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            explicit: Some(path.into()),
            ..Self::default()
        }
    }

    /// Replace the search paths.
    #[must_use]
    pub fn with_search_paths(mut self, search_paths: Vec<PathBuf>) -> Self {
        self.search_paths = search_paths;
        self
    }

    /// Replace the environment fallback value.
    #[must_use]
    pub fn with_env_value(mut self, value: Option<String>) -> Self {
        self.env_value = value;
        self
    }

    /// Find the raw key and where it came from, without validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit file is missing, or any consulted
    /// file cannot be read or parsed.
    pub fn lookup(&self) -> Result<Option<(String, SecretSource)>> {
        if let Some(path) = &self.explicit {
            return Ok(read_secrets_file(path)?.map(|key| (key, SecretSource::File(path.clone()))));
        }

        for path in &self.search_paths {
            if !path.is_file() {
                tracing::debug!("No secrets file at {}", path.display());
                continue;
            }
            if let Some(key) = read_secrets_file(path)? {
                return Ok(Some((key, SecretSource::File(path.clone()))));
            }
        }

        Ok(self
            .env_value
            .clone()
            .map(|key| (key, SecretSource::Environment)))
    }

    /// Find and validate the API key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] if no source defines the key or
    /// its value is blank or the placeholder, and a read/parse error if a
    /// secrets file is broken.
    pub fn credential(&self) -> Result<Credential> {
        let Some((raw, source)) = self.lookup()? else {
            tracing::warn!("{API_KEY_NAME} not found in any secrets file or the environment");
            return Err(Error::MissingCredential { name: API_KEY_NAME });
        };

        let credential = Credential::new(&raw).inspect_err(|_| {
            tracing::warn!("{API_KEY_NAME} from {source} is empty or a placeholder");
        })?;

        tracing::info!("Using {API_KEY_NAME} from {source}");
        Ok(credential)
    }
}

/// Secrets files searched when none is given explicitly, in order.
fn default_search_paths(home_dir: Option<PathBuf>, config_dir: Option<PathBuf>) -> Vec<PathBuf> {
    let mut search_paths = vec![PathBuf::from(".streamlit").join("secrets.toml")];
    if let Some(home_dir) = home_dir {
        search_paths.push(home_dir.join(".streamlit").join("secrets.toml"));
    }
    if let Some(config_dir) = config_dir {
        search_paths.push(config_dir.join("green-doctor").join("secrets.toml"));
    }
    search_paths
}

/// Read the API key from a TOML secrets file.
fn read_secrets_file(path: &Path) -> Result<Option<String>> {
    let contents = std::fs::read_to_string(path).map_err(|source| Error::SecretsRead {
        path: path.to_path_buf(),
        source,
    })?;

    let secrets: SecretsFile = toml::from_str(&contents).map_err(|source| Error::SecretsParse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(secrets.gemini_api_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::PLACEHOLDER_API_KEY;

    fn write_secrets(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_secrets(
            dir.path(),
            "secrets.toml",
            "OTHER = \"x\"\nGEMINI_API_KEY = \"AIzaFromFile\"\n",
        );

        let store = SecretStore::from_file(&path);
        let (key, source) = store.lookup().unwrap().unwrap();

        assert_eq!(key, "AIzaFromFile");
        assert_eq!(source, SecretSource::File(path));
        assert_eq!(store.credential().unwrap().expose(), "AIzaFromFile");
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let store = SecretStore::from_file(dir.path().join("missing.toml"))
            .with_env_value(Some("AIzaFromEnv".to_string()));

        assert!(matches!(store.lookup(), Err(Error::SecretsRead { .. })));
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_secrets(dir.path(), "secrets.toml", "GEMINI_API_KEY = ");

        let err = SecretStore::from_file(path).credential().unwrap_err();
        assert!(matches!(err, Error::SecretsParse { .. }));
        assert!(err.needs_setup());
    }

    #[test]
    fn test_non_string_key_needs_setup() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_secrets(dir.path(), "secrets.toml", "GEMINI_API_KEY = 42\n");

        let err = SecretStore::default()
            .with_search_paths(vec![path])
            .with_env_value(Some("AIzaFromEnv".to_string()))
            .credential()
            .unwrap_err();
        assert!(matches!(err, Error::SecretsParse { .. }));
        assert!(err.needs_setup());
    }

    #[test]
    fn test_unreadable_explicit_file_is_not_setup() {
        let dir = tempfile::tempdir().unwrap();
        let err = SecretStore::from_file(dir.path().join("missing.toml"))
            .credential()
            .unwrap_err();

        assert!(!err.needs_setup());
        assert!(SecretStore::default().credential().unwrap_err().needs_setup());
    }

    #[test]
    fn test_search_paths_then_env() {
        let dir = tempfile::tempdir().unwrap();
        let without_key = write_secrets(dir.path(), "a.toml", "OTHER = \"x\"\n");
        let missing = dir.path().join("missing.toml");

        let store = SecretStore::default()
            .with_search_paths(vec![missing.clone(), without_key.clone()])
            .with_env_value(Some("AIzaFromEnv".to_string()));
        let (key, source) = store.lookup().unwrap().unwrap();
        assert_eq!(key, "AIzaFromEnv");
        assert_eq!(source, SecretSource::Environment);

        let with_key = write_secrets(dir.path(), "b.toml", "GEMINI_API_KEY = \"AIzaFromB\"\n");
        let store = store.with_search_paths(vec![missing, without_key, with_key.clone()]);
        let (key, source) = store.lookup().unwrap().unwrap();
        assert_eq!(key, "AIzaFromB");
        assert_eq!(source, SecretSource::File(with_key));
    }

    #[test]
    fn test_nothing_configured() {
        let store = SecretStore::default();

        assert!(store.lookup().unwrap().is_none());
        assert!(matches!(
            store.credential(),
            Err(Error::MissingCredential { .. })
        ));
    }

    #[test]
    fn test_placeholder_in_file_is_not_overridden_by_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_secrets(
            dir.path(),
            "secrets.toml",
            &format!("GEMINI_API_KEY = \"{PLACEHOLDER_API_KEY}\"\n"),
        );

        let store = SecretStore::default()
            .with_search_paths(vec![path])
            .with_env_value(Some("AIzaFromEnv".to_string()));

        assert!(matches!(
            store.credential(),
            Err(Error::MissingCredential { .. })
        ));
    }

    #[test]
    fn test_default_search_paths_include_streamlit_home() {
        let paths = default_search_paths(
            Some(PathBuf::from("/home/grower")),
            Some(PathBuf::from("/home/grower/.config")),
        );

        assert_eq!(
            paths,
            vec![
                PathBuf::from(".streamlit/secrets.toml"),
                PathBuf::from("/home/grower/.streamlit/secrets.toml"),
                PathBuf::from("/home/grower/.config/green-doctor/secrets.toml"),
            ]
        );
        assert_eq!(default_search_paths(None, None).len(), 1);
    }

    #[test]
    fn test_source_display() {
        assert_eq!(SecretSource::Environment.to_string(), "$GEMINI_API_KEY");
    }
}
