//! Persistence port for the physician directory.

use async_trait::async_trait;

use super::StoreError;
use crate::domain::{Physician, PhysicianDraft};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhysicianRepository: Send + Sync {
    async fn create(&self, draft: &PhysicianDraft) -> Result<Physician, StoreError>;

    /// Every physician in insertion order.
    async fn list(&self) -> Result<Vec<Physician>, StoreError>;
}
