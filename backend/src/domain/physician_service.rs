//! Physician directory and account listing services.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    PhysicianDirectory, PhysicianRepository, StoreError, UserAccountRepository, UserDirectory,
};
use crate::domain::{Physician, PhysicianDraft, UserAccount};

#[derive(Clone)]
pub struct PhysicianService<R> {
    physicians: Arc<R>,
}

impl<R> PhysicianService<R> {
    pub fn new(physicians: Arc<R>) -> Self {
        Self { physicians }
    }
}

#[async_trait]
impl<R> PhysicianDirectory for PhysicianService<R>
where
    R: PhysicianRepository,
{
    async fn create(&self, draft: &PhysicianDraft) -> Result<Physician, StoreError> {
        let physician = self.physicians.create(draft).await?;
        info!(physician_id = physician.id, "physician created");
        Ok(physician)
    }

    async fn list(&self) -> Result<Vec<Physician>, StoreError> {
        self.physicians.list().await
    }
}

/// Read-only account listing for administrators.
#[derive(Clone)]
pub struct UserDirectoryService<U> {
    accounts: Arc<U>,
}

impl<U> UserDirectoryService<U> {
    pub fn new(accounts: Arc<U>) -> Self {
        Self { accounts }
    }
}

#[async_trait]
impl<U> UserDirectory for UserDirectoryService<U>
where
    U: UserAccountRepository,
{
    async fn list_accounts(&self) -> Result<Vec<UserAccount>, StoreError> {
        self.accounts.list().await
    }
}
