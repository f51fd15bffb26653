//! Unsigned big-endian integers as unpadded base64url, the representation
//! RFC 7518 §6.3.1 prescribes for the `n` and `e` members of an RSA JWK.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use num_bigint::{BigInt, BigUint};

use crate::error::InvalidInputError;

/// Number of bytes in the minimal big-endian encoding of `value`.
///
/// This is `ceil(bits / 8)`, except that zero still occupies one byte.
pub fn byte_length(value: &BigUint) -> usize {
    let bytes = (value.bits() + 7) / 8;
    usize::try_from(bytes).unwrap_or(usize::MAX).max(1)
}

fn to_minimal_be_bytes(value: &BigUint) -> Vec<u8> {
    if value.bits() == 0 {
        return vec![0];
    }
    value.to_bytes_be()
}

/// Encode an unsigned integer as unpadded base64url.
///
/// ```rust
/// use num_bigint::BigUint;
///
/// assert_eq!(jwks_export::encode_unsigned(&BigUint::from(65537u32)), "AQAB");
/// assert_eq!(jwks_export::encode_unsigned(&BigUint::from(0u32)), "AA");
/// ```
pub fn encode_unsigned(value: &BigUint) -> String {
    URL_SAFE_NO_PAD.encode(to_minimal_be_bytes(value))
}

/// Encode a signed integer, rejecting negative values.
pub fn encode_signed(value: &BigInt) -> Result<String, InvalidInputError> {
    let unsigned = value
        .to_biguint()
        .ok_or(InvalidInputError::NegativeInteger)?;
    Ok(encode_unsigned(&unsigned))
}

/// Inverse of [encode_unsigned].
///
/// Only strings [encode_unsigned] could have produced are accepted: no padding,
/// at least one byte, and no leading zero byte unless the value is zero.
pub fn decode_unsigned(encoded: &str) -> Result<BigUint, InvalidInputError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|e| InvalidInputError::Base64(e.to_string()))?;
    match bytes.as_slice() {
        [] => Err(InvalidInputError::Base64("empty integer".to_string())),
        [0, _, ..] => Err(InvalidInputError::Base64(
            "non-minimal integer with leading zero byte".to_string(),
        )),
        _ => Ok(BigUint::from_bytes_be(&bytes)),
    }
}
