//! Loading RSA key material from PEM.
//!
//! Everything past this module only ever sees the two public integers, through
//! [RsaPublicComponents].

use num_bigint::BigUint;
use pkcs8::{
    der::Decode, DecodePublicKey, Document, EncryptedPrivateKeyInfo, PrivateKeyInfo,
    SecretDocument,
};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::error::KeyLoadError;

const PKCS1_PRIVATE: &str = "RSA PRIVATE KEY";
const PKCS8_PRIVATE: &str = "PRIVATE KEY";
const PKCS8_ENCRYPTED: &str = "ENCRYPTED PRIVATE KEY";
const PKCS1_PUBLIC: &str = "RSA PUBLIC KEY";
const SPKI_PUBLIC: &str = "PUBLIC KEY";

/// Read-only access to the public half of an RSA key.
pub trait RsaPublicComponents {
    /// The modulus `n`.
    fn modulus(&self) -> BigUint;

    /// The public exponent `e`.
    fn exponent(&self) -> BigUint;
}

/// Owned RSA public components, detached from any crypto library type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaComponents {
    /// The modulus `n`.
    pub modulus: BigUint,
    /// The public exponent `e`.
    pub exponent: BigUint,
}

impl RsaPublicComponents for RsaComponents {
    fn modulus(&self) -> BigUint {
        self.modulus.clone()
    }

    fn exponent(&self) -> BigUint {
        self.exponent.clone()
    }
}

// rsa carries its own bigint type; go through bytes to reach num-bigint.
impl RsaPublicComponents for RsaPublicKey {
    fn modulus(&self) -> BigUint {
        BigUint::from_bytes_be(&self.n().to_bytes_be())
    }

    fn exponent(&self) -> BigUint {
        BigUint::from_bytes_be(&self.e().to_bytes_be())
    }
}

impl From<&RsaPublicKey> for RsaComponents {
    fn from(key: &RsaPublicKey) -> Self {
        RsaComponents {
            modulus: key.modulus(),
            exponent: key.exponent(),
        }
    }
}

/// Load a PEM private key and return its public components.
///
/// PKCS#1 (`RSA PRIVATE KEY`), PKCS#8 (`PRIVATE KEY`) and password-protected
/// PKCS#8 (`ENCRYPTED PRIVATE KEY`) are accepted.
pub fn load_rsa_public_key_from_private(
    pem: &[u8],
    password: Option<&[u8]>,
) -> Result<RsaComponents, KeyLoadError> {
    let pem = std::str::from_utf8(pem).map_err(|_| KeyLoadError::NotPem)?;
    let label = pem_label(pem).ok_or(KeyLoadError::NotPem)?;

    let private_key = match (label, password) {
        (PKCS8_ENCRYPTED, None) => return Err(KeyLoadError::PasswordRequired),
        (PKCS8_ENCRYPTED, Some(password)) => load_pkcs8_encrypted(pem, password)?,
        (PKCS1_PRIVATE | PKCS8_PRIVATE, Some(_)) => {
            return Err(KeyLoadError::UnexpectedPassword)
        }
        (PKCS1_PRIVATE, None) => RsaPrivateKey::from_pkcs1_pem(pem)
            .map_err(|e| KeyLoadError::Malformed(e.to_string()))?,
        (PKCS8_PRIVATE, None) => load_pkcs8_private(pem)?,
        (other, _) => return Err(KeyLoadError::UnsupportedLabel(other.to_string())),
    };

    Ok(RsaComponents::from(&private_key.to_public_key()))
}

/// Load a PEM public key (SPKI `PUBLIC KEY` or PKCS#1 `RSA PUBLIC KEY`).
pub fn load_rsa_public_key(pem: &[u8]) -> Result<RsaComponents, KeyLoadError> {
    let pem = std::str::from_utf8(pem).map_err(|_| KeyLoadError::NotPem)?;
    let public_key = match pem_label(pem).ok_or(KeyLoadError::NotPem)? {
        SPKI_PUBLIC => RsaPublicKey::from_public_key_pem(pem)
            .map_err(|e| KeyLoadError::Malformed(e.to_string()))?,
        PKCS1_PUBLIC => RsaPublicKey::from_pkcs1_pem(pem)
            .map_err(|e| KeyLoadError::Malformed(e.to_string()))?,
        other => return Err(KeyLoadError::UnsupportedLabel(other.to_string())),
    };

    Ok(RsaComponents::from(&public_key))
}

fn load_pkcs8_private(pem: &str) -> Result<RsaPrivateKey, KeyLoadError> {
    let (_, document) =
        SecretDocument::from_pem(pem).map_err(|e| KeyLoadError::Malformed(e.to_string()))?;
    rsa_from_pkcs8_der(&document)
}

// Only the decryption step maps to `Decrypt`; the plaintext goes through the
// same checks as an unencrypted key.
fn load_pkcs8_encrypted(pem: &str, password: &[u8]) -> Result<RsaPrivateKey, KeyLoadError> {
    let (_, document) =
        Document::from_pem(pem).map_err(|e| KeyLoadError::Malformed(e.to_string()))?;
    let info = EncryptedPrivateKeyInfo::from_der(document.as_bytes())
        .map_err(|e| KeyLoadError::Malformed(e.to_string()))?;
    let decrypted = info
        .decrypt(password)
        .map_err(|e| KeyLoadError::Decrypt(e.to_string()))?;
    rsa_from_pkcs8_der(&decrypted)
}

// Check the algorithm before handing off, so non-RSA keys get their own error.
fn rsa_from_pkcs8_der(document: &SecretDocument) -> Result<RsaPrivateKey, KeyLoadError> {
    let info = PrivateKeyInfo::from_der(document.as_bytes())
        .map_err(|e| KeyLoadError::Malformed(e.to_string()))?;

    if info.algorithm.oid != rsa::pkcs1::ALGORITHM_OID {
        return Err(KeyLoadError::NotRsa(info.algorithm.oid.to_string()));
    }

    RsaPrivateKey::try_from(info).map_err(|e| KeyLoadError::Malformed(e.to_string()))
}

/// Label of the first `-----BEGIN <label>-----` boundary, if any.
fn pem_label(pem: &str) -> Option<&str> {
    let start = pem.find("-----BEGIN ")? + "-----BEGIN ".len();
    let rest = pem.get(start..)?;
    let end = rest.find("-----")?;
    rest.get(..end)
}
