//! Persistence port for user accounts.

use async_trait::async_trait;

use super::StoreError;
use crate::domain::{NewUserAccount, StoredCredentials, UserAccount};

/// Port for creating and reading user accounts.
///
/// Username uniqueness is enforced by the store: `create` reports a
/// violation as [`StoreError::Conflict`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccountRepository: Send + Sync {
    /// Insert a new account in a single atomic write.
    async fn create(&self, account: &NewUserAccount) -> Result<UserAccount, StoreError>;

    /// Account and password hash for `username`.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, StoreError>;

    /// Every account ordered by id.
    async fn list(&self) -> Result<Vec<UserAccount>, StoreError>;
}
