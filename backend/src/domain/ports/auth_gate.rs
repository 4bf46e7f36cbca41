//! Driving port for registration and login.
//!
//! Inbound adapters call it to turn form input into accounts and session
//! identities without touching persistence or hashing directly.

use async_trait::async_trait;

use crate::domain::{AuthError, LoginCredentials, Registration, SessionIdentity, UserAccount};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGate: Send + Sync {
    /// Create an account with the role granted by the access code. Does not
    /// log the user in.
    async fn register(&self, registration: &Registration) -> Result<UserAccount, AuthError>;

    /// Check credentials and produce the identity to bind to the session.
    async fn login(&self, credentials: &LoginCredentials) -> Result<SessionIdentity, AuthError>;
}
