//! Authentication primitives: validated credentials, the identity bound to a
//! browser session, and the tagged failures of registration and login.

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::{Error, Role, UserAccount, UserId};
use crate::domain::ports::{CredentialHashError, StoreError};

/// Validation failures for login and registration payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("access code must not be empty")]
    EmptyAccessCode,
}

impl From<CredentialsValidationError> for Error {
    fn from(value: CredentialsValidationError) -> Self {
        Error::invalid_request(value.to_string())
    }
}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller whitespace.
///
/// # Examples
/// ```
/// use clinic_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" jdoe ", "pw123").unwrap();
/// assert_eq!(creds.username(), "jdoe");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw form input.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(CredentialsValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Registration request: credentials plus the access code granting a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    credentials: LoginCredentials,
    access_code: String,
}

impl Registration {
    /// Validate raw form input. The access code is trimmed.
    pub fn try_from_parts(
        username: &str,
        password: &str,
        access_code: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let credentials = LoginCredentials::try_from_parts(username, password)?;
        let access_code = access_code.trim();
        if access_code.is_empty() {
            return Err(CredentialsValidationError::EmptyAccessCode);
        }
        Ok(Self {
            credentials,
            access_code: access_code.to_owned(),
        })
    }

    pub fn credentials(&self) -> &LoginCredentials {
        &self.credentials
    }

    pub fn access_code(&self) -> &str {
        &self.access_code
    }
}

/// Identity bound to an authenticated browser session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
}

impl From<UserAccount> for SessionIdentity {
    fn from(account: UserAccount) -> Self {
        Self {
            user_id: account.id,
            username: account.username,
            role: account.role,
        }
    }
}

/// Tagged outcome of a failed registration or login.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The access code is unknown.
    #[error("access code rejected")]
    InvalidAccessCode,
    /// Another account already owns the username.
    #[error("username {username} is already registered")]
    DuplicateUsername { username: String },
    /// No account matches the username.
    #[error("no account named {username}")]
    UserNotFound { username: String },
    /// The password does not match the stored hash.
    #[error("password mismatch")]
    InvalidPassword,
    #[error(transparent)]
    Hashing(#[from] CredentialHashError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<AuthError> for Error {
    fn from(value: AuthError) -> Self {
        match value {
            // Wording must not reveal whether the code exists.
            AuthError::InvalidAccessCode => Error::forbidden("Codigo de acceso denegado"),
            AuthError::DuplicateUsername { .. } => Error::conflict("El usuario ya existe"),
            AuthError::UserNotFound { .. } => Error::unauthorized("Usuario no encontrado"),
            AuthError::InvalidPassword => Error::unauthorized("Contraseña incorrecta"),
            AuthError::Hashing(err) => Error::internal(err.to_string()),
            AuthError::Store(err) => err.into(),
        }
    }
}
