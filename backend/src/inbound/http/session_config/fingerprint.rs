//! Loggable fingerprint of the session key.
//!
//! Lets operators tell which secret a running instance uses without exposing
//! key material.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

const FINGERPRINT_BYTES: usize = 8;

/// First 8 bytes of the SHA-256 of the key's signing half, hex encoded.
///
/// # Examples
/// ```
/// use actix_web::cookie::Key;
/// use clinic_backend::inbound::http::session_config::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
