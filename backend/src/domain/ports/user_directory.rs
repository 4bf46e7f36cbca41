//! Driving port listing registered accounts for administrators.

use async_trait::async_trait;

use super::StoreError;
use crate::domain::UserAccount;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list_accounts(&self) -> Result<Vec<UserAccount>, StoreError>;
}
