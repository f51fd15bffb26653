use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Key file read when `JWKS_PRIVATE_KEY_PATH` is unset.
pub const DEFAULT_PRIVATE_KEY_PATH: &str = "private_key.pem";
/// Document written when `JWKS_OUTPUT_PATH` is unset.
pub const DEFAULT_OUTPUT_PATH: &str = "jwks.json";
/// `kid` published when `JWKS_KEY_ID` is unset.
pub const DEFAULT_KEY_ID: &str = "primary-signing-key";

/// Where to read the signing key, where to write the JWKS, and under which `kid`.
#[derive(Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// PEM private key to export.
    pub private_key_path: PathBuf,
    /// Destination of the JWKS document.
    pub output_path: PathBuf,
    /// Key id to publish.
    pub key_id: String,
    /// Password for an encrypted PKCS#8 key.
    pub password: Option<String>,
}

/// Invalid configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set to an empty string where a value is required.
    #[error("environment variable {0} must not be empty")]
    Empty(String),

    /// A variable was not valid unicode.
    #[error("environment variable {0} is not valid unicode")]
    NotUnicode(String),
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            private_key_path: PathBuf::from(DEFAULT_PRIVATE_KEY_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            key_id: DEFAULT_KEY_ID.to_string(),
            password: None,
        }
    }
}

// Keep the password out of logs and panics.
impl std::fmt::Debug for ExportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportConfig")
            .field("private_key_path", &self.private_key_path)
            .field("output_path", &self.output_path)
            .field("key_id", &self.key_id)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl ExportConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut vars = HashMap::new();
        for (key, value) in env::vars_os() {
            let Some(key) = key.to_str().map(str::to_string) else {
                continue;
            };
            if !key.starts_with("JWKS_") {
                continue;
            }
            let value = value
                .into_string()
                .map_err(|_| ConfigError::NotUnicode(key.clone()))?;
            vars.insert(key, value);
        }
        Self::from_vars(&vars)
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let private_key_path = non_empty(vars, "JWKS_PRIVATE_KEY_PATH")?
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PRIVATE_KEY_PATH));

        let output_path = non_empty(vars, "JWKS_OUTPUT_PATH")?
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));

        let key_id = non_empty(vars, "JWKS_KEY_ID")?
            .cloned()
            .unwrap_or_else(|| DEFAULT_KEY_ID.to_string());

        // An empty password means "none", matching an unset variable.
        let password = vars.get("JWKS_KEY_PASSWORD").filter(|p| !p.is_empty()).cloned();

        Ok(ExportConfig {
            private_key_path,
            output_path,
            key_id,
            password,
        })
    }
}

fn non_empty<'a>(
    vars: &'a HashMap<String, String>,
    name: &str,
) -> Result<Option<&'a String>, ConfigError> {
    match vars.get(name) {
        Some(value) if value.is_empty() => Err(ConfigError::Empty(name.to_string())),
        other => Ok(other),
    }
}
