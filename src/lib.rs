#![warn(missing_docs)]
//!
//! This crate exports the public half of an RSA signing key as a [JSON Web Key Set](https://www.rfc-editor.org/rfc/rfc7517) (JWKS), ready to be served from a `/.well-known/jwks.json` endpoint to relying parties that verify RS256 tokens.
//!
//! Each key is published with `kty = "RSA"`, `use = "sig"` and `alg = "RS256"`, and its modulus and exponent are written as unpadded base64url big-endian integers per [RFC 7518 §6.3.1](https://www.rfc-editor.org/rfc/rfc7518#section-6.3.1).
//!
//! ## Usage
//!
//! The `jwks-export` binary reads `private_key.pem` from the working directory and writes `jwks.json` next to it. Paths, key id and key password can be overridden with the `JWKS_PRIVATE_KEY_PATH`, `JWKS_OUTPUT_PATH`, `JWKS_KEY_ID` and `JWKS_KEY_PASSWORD` environment variables.
//!
//! From code, build keys directly from their components:
//!
//! ```rust
//! use num_bigint::BigUint;
//! use jwks_export::{build_jwk, build_jwks};
//!
//! let modulus = BigUint::from(3233u32);
//! let exponent = BigUint::from(65537u32);
//!
//! let jwks = build_jwks(vec![build_jwk(&modulus, &exponent, "primary").unwrap()]);
//! let json = String::from_utf8(jwks.to_json_pretty().unwrap()).unwrap();
//! assert!(json.contains("\"e\": \"AQAB\""));
//! ```
//!
//! or run the whole export from an [ExportConfig] with [export].
//!
mod config;
mod encode;
mod error;
mod export;
mod jwk;
mod key;
pub mod logging;
mod verify;

pub use config::{
    ConfigError, ExportConfig, DEFAULT_KEY_ID, DEFAULT_OUTPUT_PATH, DEFAULT_PRIVATE_KEY_PATH,
};
pub use encode::{byte_length, decode_unsigned, encode_signed, encode_unsigned};
pub use error::{InvalidInputError, JwksError, KeyLoadError};
pub use export::{export, generate_jwks, write_jwks, GeneratedJwks};
pub use jwk::{build_jwk, build_jwks, Jwk, Jwks};
pub use key::{load_rsa_public_key, load_rsa_public_key_from_private, RsaComponents, RsaPublicComponents};
pub use verify::{verify_token, VerifyError};
