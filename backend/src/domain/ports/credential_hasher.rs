//! Port for salted one-way password hashing.
//!
//! Hashing is CPU-bound and synchronous; services move calls onto the
//! blocking pool.

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential hashers.
    pub enum CredentialHashError {
        /// Hashing the password failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Produce an encoded hash embedding its own salt and parameters.
    fn hash(&self, password: &str) -> Result<String, CredentialHashError>;

    /// Check `password` against `encoded`. A mismatch is `Ok(false)`.
    fn verify(&self, password: &str, encoded: &str) -> Result<bool, CredentialHashError>;
}
