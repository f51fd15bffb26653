use jsonwebkey as jwk;
use jsonwebtoken as jwt;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

/// The error type for a token that cannot be verified against a published JWKS.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Failed to decode the token header
    #[error("failed to decode token header: {0}")]
    TokenHeaderDecoding(#[source] jwt::errors::Error),

    /// The token header carries no `kid`, so no key can be selected
    #[error("token header has no kid")]
    MissingKid,

    /// Failed to parse the JWKS document
    #[error("failed to parse JWKS: {0}")]
    KeySetParsing(String),

    /// No key in the JWKS has the token's `kid`
    #[error("no key with kid {0:?} in JWKS")]
    UnknownKid(String),

    /// Signature or claim validation failed. See associated `jwt::errors::Error` for details.
    #[error("failed to decode token: {0}")]
    TokenDecoding(#[source] jwt::errors::Error),
}

#[derive(Deserialize)]
struct PublishedKeySet {
    keys: Vec<jwk::JsonWebKey>,
}

/// Verify an RS256 token the way a relying party would, using only a JWKS document.
///
/// The key is chosen by matching the token header's `kid`. `validation` decides
/// which claims are required and checked.
pub fn verify_token<C: DeserializeOwned>(
    token: &str,
    jwks_json: &str,
    validation: &jwt::Validation,
) -> Result<jwt::TokenData<C>, VerifyError> {
    let header = jwt::decode_header(token).map_err(VerifyError::TokenHeaderDecoding)?;
    let kid = header.kid.ok_or(VerifyError::MissingKid)?;

    let key_set: PublishedKeySet =
        serde_json::from_str(jwks_json).map_err(|e| VerifyError::KeySetParsing(e.to_string()))?;

    let key = key_set
        .keys
        .iter()
        .find(|k| k.key_id.as_deref() == Some(kid.as_str()))
        .ok_or(VerifyError::UnknownKid(kid))?;

    jwt::decode::<C>(token, &key.key.to_decoding_key(), validation)
        .map_err(VerifyError::TokenDecoding)
}
