use std::path::PathBuf;

use thiserror::Error;

/// A caller handed the encoder something outside its contract.
///
/// None of these can occur with key material read from a real RSA key; they
/// indicate a bug in the caller rather than a recoverable condition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidInputError {
    /// JWK integers are unsigned; RFC 7518 gives no encoding for negatives.
    #[error("cannot base64url-encode negative integer")]
    NegativeInteger,

    /// Relying parties select keys by `kid`, so it may not be blank.
    #[error("key id must not be empty")]
    EmptyKeyId,

    /// A JWK integer field was not unpadded base64url.
    #[error("invalid base64url integer: {0}")]
    Base64(String),
}

/// The private (or public) key could not be turned into RSA components.
#[derive(Debug, Error)]
pub enum KeyLoadError {
    /// The key file could not be read.
    #[error("failed to read key file {path}: {source}")]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The bytes carry no `-----BEGIN ...-----` boundary.
    #[error("key material is not PEM encoded")]
    NotPem,

    /// PEM label this crate does not know how to load (e.g. `EC PRIVATE KEY`).
    #[error("unsupported PEM label {0:?}")]
    UnsupportedLabel(String),

    /// A PKCS#8 key for some algorithm other than RSA.
    #[error("key is not RSA (algorithm {0})")]
    NotRsa(String),

    /// The PEM body failed to decode as the structure its label promised.
    #[error("malformed key: {0}")]
    Malformed(String),

    /// The key is encrypted and no password was configured.
    #[error("key is encrypted but no password was supplied")]
    PasswordRequired,

    /// A password was configured for a key that is not encrypted.
    #[error("password supplied but key is not encrypted")]
    UnexpectedPassword,

    /// Decryption failed, most often because of a wrong password.
    #[error("failed to decrypt key: {0}")]
    Decrypt(String),
}

/// Top-level failure of a JWKS export.
#[derive(Debug, Error)]
pub enum JwksError {
    /// Loading the signing key failed.
    #[error(transparent)]
    KeyLoad(#[from] KeyLoadError),

    /// The encoder rejected its input.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    /// Writing the output document failed.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Destination that was being written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The JWKS could not be serialized.
    #[error("failed to serialize JWKS: {0}")]
    Serialize(#[from] serde_json::Error),
}
