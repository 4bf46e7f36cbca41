//! Read-only lookup of provisioned access codes.

use async_trait::async_trait;

use super::StoreError;
use crate::domain::Role;

/// Port resolving an access code to the role it grants.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessCodeRepository: Send + Sync {
    /// Role granted by `code`, or `None` when the code is unknown.
    async fn find_role(&self, code: &str) -> Result<Option<Role>, StoreError>;
}
