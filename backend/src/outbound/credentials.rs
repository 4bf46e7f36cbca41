//! Argon2id implementation of the [`CredentialHasher`] port.
//!
//! Hashes are stored in PHC string format, which embeds the salt and cost
//! parameters, so parameters can change without invalidating old hashes.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::domain::ports::{CredentialHashError, CredentialHasher};

/// Argon2id hasher with the crate's default cost parameters.
#[derive(Debug, Clone, Default)]
pub struct Argon2CredentialHasher {
    argon2: Argon2<'static>,
}

impl Argon2CredentialHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &str) -> Result<String, CredentialHashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| CredentialHashError::hash(err.to_string()))
    }

    fn verify(&self, password: &str, encoded: &str) -> Result<bool, CredentialHashError> {
        let parsed = PasswordHash::new(encoded)
            .map_err(|err| CredentialHashError::malformed_hash(err.to_string()))?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(CredentialHashError::malformed_hash(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_salted_argon2id() {
        let hasher = Argon2CredentialHasher::new();
        let first = hasher.hash("pw123").expect("hash");
        let second = hasher.hash("pw123").expect("hash");
        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
    }

    #[test]
    fn verify_accepts_only_the_original_password() {
        let hasher = Argon2CredentialHasher::new();
        let encoded = hasher.hash("pw123").expect("hash");
        assert_eq!(hasher.verify("pw123", &encoded), Ok(true));
        assert_eq!(hasher.verify("pw124", &encoded), Ok(false));
    }

    #[test]
    fn verify_reports_malformed_hashes() {
        let hasher = Argon2CredentialHasher::new();
        let err = hasher
            .verify("pw123", "$2b$10$bcrypt-looking-garbage")
            .expect_err("not a PHC argon2 hash");
        assert!(matches!(err, CredentialHashError::MalformedHash { .. }));
    }
}
