use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::encode::encode_unsigned;
use crate::error::InvalidInputError;
use crate::key::RsaPublicComponents;

/// A public RSA signing key in JWK form (RFC 7517 §4, RFC 7518 §6.3.1).
///
/// Fields serialize in declaration order so the rendered document stays
/// diff-stable between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type, always `"RSA"`.
    pub kty: String,
    /// Key id relying parties use to pick this key.
    pub kid: String,
    /// Intended use, always `"sig"`.
    #[serde(rename = "use")]
    pub use_: String,
    /// Signing algorithm, always `"RS256"`.
    pub alg: String,
    /// Modulus, unpadded base64url.
    pub n: String,
    /// Public exponent, unpadded base64url.
    pub e: String,
}

/// An ordered set of [Jwk]s, as published at a `jwks.json` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwks {
    /// Keys in insertion order. Duplicate `kid`s are kept as given.
    pub keys: Vec<Jwk>,
}

/// Build an RS256 signature-verification [Jwk] from raw RSA components.
///
/// ```rust
/// use num_bigint::BigUint;
///
/// let jwk = jwks_export::build_jwk(&BigUint::from(3233u32), &BigUint::from(65537u32), "k1").unwrap();
/// assert_eq!(jwk.e, "AQAB");
/// assert_eq!(jwk.kid, "k1");
/// ```
pub fn build_jwk(
    modulus: &BigUint,
    exponent: &BigUint,
    key_id: impl Into<String>,
) -> Result<Jwk, InvalidInputError> {
    let kid = key_id.into();
    if kid.is_empty() {
        return Err(InvalidInputError::EmptyKeyId);
    }

    Ok(Jwk {
        kty: "RSA".to_string(),
        kid,
        use_: "sig".to_string(),
        alg: "RS256".to_string(),
        n: encode_unsigned(modulus),
        e: encode_unsigned(exponent),
    })
}

/// Wrap keys into a [Jwks], preserving their order.
///
/// An empty set is allowed; relying parties will find no usable key in it.
pub fn build_jwks(keys: Vec<Jwk>) -> Jwks {
    if keys.is_empty() {
        warn!("building JWKS with no keys");
    }
    Jwks { keys }
}

impl Jwk {
    /// Build a [Jwk] from anything exposing RSA public components.
    pub fn from_public_key<K>(key: &K, key_id: impl Into<String>) -> Result<Self, InvalidInputError>
    where
        K: RsaPublicComponents + ?Sized,
    {
        build_jwk(&key.modulus(), &key.exponent(), key_id)
    }
}

impl Jwks {
    /// First key whose `kid` equals `kid`.
    pub fn find(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|k| k.kid == kid)
    }

    /// Render as UTF-8 JSON with 2-space indentation and a trailing newline.
    pub fn to_json_pretty(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut out = serde_json::to_vec_pretty(self)?;
        out.push(b'\n');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::RsaComponents;

    fn key(kid: &str) -> Jwk {
        build_jwk(&BigUint::from(3233u32), &BigUint::from(17u32), kid).unwrap()
    }

    #[test]
    fn fixed_fields() {
        let jwk = build_jwk(&BigUint::from(3233u32), &BigUint::from(65537u32), "key-1").unwrap();
        assert_eq!(jwk.kty, "RSA");
        assert_eq!(jwk.use_, "sig");
        assert_eq!(jwk.alg, "RS256");
        assert_eq!(jwk.kid, "key-1");
        assert_eq!(jwk.n, "DKE");
        assert_eq!(jwk.e, "AQAB");
    }

    #[test]
    fn empty_key_id_rejected() {
        let res = build_jwk(&BigUint::from(3233u32), &BigUint::from(65537u32), "");
        assert_eq!(res, Err(InvalidInputError::EmptyKeyId));
    }

    #[test]
    fn build_is_deterministic() {
        let modulus = (BigUint::from(1u32) << 2047) + 12345u32;
        let exponent = BigUint::from(65537u32);
        let a = build_jwk(&modulus, &exponent, "same").unwrap();
        let b = build_jwk(&modulus, &exponent, "same").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn from_public_key_matches_build_jwk() {
        let components = RsaComponents {
            modulus: BigUint::from(3233u32),
            exponent: BigUint::from(65537u32),
        };
        let via_trait = Jwk::from_public_key(&components, "k").unwrap();
        let direct = build_jwk(&components.modulus, &components.exponent, "k").unwrap();
        assert_eq!(via_trait, direct);
    }

    #[test]
    fn jwks_keeps_order_and_duplicates() {
        let jwks = build_jwks(vec![key("b"), key("a"), key("b")]);
        let kids: Vec<&str> = jwks.keys.iter().map(|k| k.kid.as_str()).collect();
        assert_eq!(kids, ["b", "a", "b"]);
    }

    #[test]
    fn jwks_of_two() {
        let jwks = build_jwks(vec![key("first"), key("second")]);
        assert_eq!(jwks.keys.len(), 2);
        assert_eq!(jwks.keys[0].kid, "first");
        assert_eq!(jwks.keys[1].kid, "second");
    }

    #[test]
    fn empty_jwks() {
        let jwks = build_jwks(vec![]);
        assert!(jwks.keys.is_empty());
        let json = String::from_utf8(jwks.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json, "{\n  \"keys\": []\n}\n");
    }

    #[test]
    fn find_by_kid() {
        let jwks = build_jwks(vec![key("primary"), key("backup")]);
        assert_eq!(jwks.find("backup").map(|k| k.kid.as_str()), Some("backup"));
        assert!(jwks.find("missing").is_none());
    }

    #[test]
    fn serialized_field_order() {
        let jwks = build_jwks(vec![key("key-1")]);
        let json = String::from_utf8(jwks.to_json_pretty().unwrap()).unwrap();
        let expected = r#"{
  "keys": [
    {
      "kty": "RSA",
      "kid": "key-1",
      "use": "sig",
      "alg": "RS256",
      "n": "DKE",
      "e": "EQ"
    }
  ]
}
"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn deserializes_use_field() {
        let json = r#"{"keys":[{"kty":"RSA","kid":"k","use":"sig","alg":"RS256","n":"DKE","e":"AQAB"}]}"#;
        let jwks: Jwks = serde_json::from_str(json).unwrap();
        assert_eq!(jwks.keys[0].use_, "sig");
    }
}
