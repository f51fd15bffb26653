use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{error, info, instrument};

use crate::config::ExportConfig;
use crate::error::{JwksError, KeyLoadError};
use crate::jwk::{build_jwks, Jwk, Jwks};
use crate::key::load_rsa_public_key_from_private;

/// A freshly generated key set and the `kid` its single key was published under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedJwks {
    /// The key set, holding exactly one RS256 key.
    pub jwks: Jwks,
    /// The configured key id.
    pub key_id: String,
}

/// Derive a JWKS from the private key named in `config`.
///
/// Nothing is written. Failures are logged here and returned as `Err`, which
/// carries neither a key set nor a key id.
#[instrument(skip_all, fields(key_path = %config.private_key_path.display()))]
pub fn generate_jwks(config: &ExportConfig) -> Result<GeneratedJwks, JwksError> {
    let generated = load_and_build(config);
    match &generated {
        Ok(g) => info!(kid = %g.key_id, "generated JWKS"),
        Err(e) => error!("failed to generate JWKS: {}", e),
    }
    generated
}

fn load_and_build(config: &ExportConfig) -> Result<GeneratedJwks, JwksError> {
    let pem = std::fs::read(&config.private_key_path).map_err(|source| KeyLoadError::Read {
        path: config.private_key_path.clone(),
        source,
    })?;

    let password = config.password.as_deref().map(str::as_bytes);
    let components = load_rsa_public_key_from_private(&pem, password)?;
    let jwk = Jwk::from_public_key(&components, config.key_id.as_str())?;

    Ok(GeneratedJwks {
        jwks: build_jwks(vec![jwk]),
        key_id: config.key_id.clone(),
    })
}

/// Persist `jwks` at `path`, replacing any previous document atomically.
///
/// The document is written to a temporary file beside `path` and renamed over
/// it, so readers see either the old file or the complete new one.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn write_jwks(jwks: &Jwks, path: &Path) -> Result<(), JwksError> {
    let written = persist_jwks(jwks, path);
    match &written {
        Ok(()) => info!(keys = jwks.keys.len(), "wrote JWKS"),
        Err(e) => error!("failed to write JWKS: {}", e),
    }
    written
}

fn persist_jwks(jwks: &Jwks, path: &Path) -> Result<(), JwksError> {
    let body = jwks.to_json_pretty()?;
    let io_err = |source| JwksError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(&body).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}

/// Generate the JWKS described by `config` and write it to its output path.
///
/// If the key cannot be loaded, the output path is left untouched.
pub fn export(config: &ExportConfig) -> Result<GeneratedJwks, JwksError> {
    let generated = generate_jwks(config)?;
    write_jwks(&generated.jwks, &config.output_path)?;
    Ok(generated)
}
