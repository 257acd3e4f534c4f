//! Request signing for the WrapFast backend.
//!
//! The backend authenticates requests by checking an `X-Signature` header:
//! the request path signed with HMAC-SHA256 and hex-encoded. This crate
//! provides:
//! - HMAC-SHA256 signature generation
//! - Path signing in the exact form the backend expects
//! - Constant-time signature verification

#![warn(missing_docs)]

mod error;
mod signature;

pub use error::{CryptoError, Result};
pub use signature::{constant_time_compare, hmac_sha256, sign_path, verify_signature};
