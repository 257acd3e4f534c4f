//! HMAC-SHA256 signing of request paths.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::{CryptoError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Generate an HMAC-SHA256 signature.
///
/// # Arguments
/// * `key` - Secret key bytes (any length, including empty)
/// * `message` - Message to sign
///
/// # Returns
/// Signature as a lowercase hex string (64 chars)
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> Result<String> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
    mac.update(message);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Sign a request path the way the backend verifies it.
///
/// The signed phrase is the path with a leading slash, so `"vision"` and
/// `"/vision"` produce the same signature.
pub fn sign_path(key: &str, path: &str) -> Result<String> {
    let phrase = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    hmac_sha256(key.as_bytes(), phrase.as_bytes())
}

/// Verify a hex signature against the expected value in constant time.
pub fn verify_signature(signature: &str, expected: &str) -> Result<()> {
    if constant_time_compare(signature.as_bytes(), expected.as_bytes()) {
        Ok(())
    } else {
        Err(CryptoError::SignatureMismatch)
    }
}

/// Compare two byte slices without short-circuiting on the first difference.
///
/// Slices of different length compare unequal immediately; length is not secret.
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
