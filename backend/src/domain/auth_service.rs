//! Registration and login service implementing the [`AuthGate`] port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{
    AccessCodeRepository, AuthGate, CredentialHashError, CredentialHasher, StoreError,
    UserAccountRepository,
};
use crate::domain::{
    AuthError, LoginCredentials, NewUserAccount, Registration, SessionIdentity, TraceId,
    UserAccount,
};

/// Auth gate backed by access codes, user accounts and a password hasher.
#[derive(Clone)]
pub struct AuthService<A, U, H> {
    access_codes: Arc<A>,
    accounts: Arc<U>,
    hasher: Arc<H>,
}

impl<A, U, H> AuthService<A, U, H> {
    pub fn new(access_codes: Arc<A>, accounts: Arc<U>, hasher: Arc<H>) -> Self {
        Self {
            access_codes,
            accounts,
            hasher,
        }
    }
}

impl<A, U, H> AuthService<A, U, H>
where
    H: CredentialHasher + 'static,
{
    async fn hash_password(&self, password: &str) -> Result<String, CredentialHashError> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        TraceId::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| CredentialHashError::hash(err.to_string()))?
    }

    async fn verify_password(
        &self,
        password: &str,
        encoded: String,
    ) -> Result<bool, CredentialHashError> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        TraceId::spawn_blocking(move || hasher.verify(&password, &encoded))
            .await
            .map_err(|err| CredentialHashError::hash(err.to_string()))?
    }
}

#[async_trait]
impl<A, U, H> AuthGate for AuthService<A, U, H>
where
    A: AccessCodeRepository,
    U: UserAccountRepository,
    H: CredentialHasher + 'static,
{
    async fn register(&self, registration: &Registration) -> Result<UserAccount, AuthError> {
        let username = registration.credentials().username();
        let Some(role) = self
            .access_codes
            .find_role(registration.access_code())
            .await?
        else {
            warn!(%username, "registration rejected: unknown access code");
            return Err(AuthError::InvalidAccessCode);
        };

        let password_hash = self
            .hash_password(registration.credentials().password())
            .await?;
        let account = NewUserAccount {
            username: username.to_owned(),
            password_hash,
            role,
        };

        match self.accounts.create(&account).await {
            Ok(created) => {
                info!(user_id = %created.id, %username, %role, "account registered");
                Ok(created)
            }
            Err(StoreError::Conflict { .. }) => Err(AuthError::DuplicateUsername {
                username: account.username,
            }),
            Err(err) => Err(err.into()),
        }
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<SessionIdentity, AuthError> {
        let username = credentials.username();
        let Some(stored) = self.accounts.find_by_username(username).await? else {
            warn!(%username, "login failed: unknown user");
            return Err(AuthError::UserNotFound {
                username: username.to_owned(),
            });
        };

        if !self
            .verify_password(credentials.password(), stored.password_hash)
            .await?
        {
            warn!(%username, "login failed: password mismatch");
            return Err(AuthError::InvalidPassword);
        }

        info!(user_id = %stored.account.id, %username, "login succeeded");
        Ok(stored.account.into())
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
