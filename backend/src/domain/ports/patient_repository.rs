//! Persistence port for patient records.

use async_trait::async_trait;

use super::StoreError;
use crate::domain::{Patient, PatientDraft, PatientId, PatientOrder, PatientSearch};

/// Port for patient CRUD, filtering and batch insertion.
///
/// Implementations must bind every user-supplied value as a query parameter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientRepository: Send + Sync {
    async fn create(&self, draft: &PatientDraft) -> Result<Patient, StoreError>;

    async fn list(&self, order: PatientOrder) -> Result<Vec<Patient>, StoreError>;

    /// Rows matching every present filter, ordered by id, capped at `limit`
    /// when given.
    async fn search(
        &self,
        search: &PatientSearch,
        limit: Option<i64>,
    ) -> Result<Vec<Patient>, StoreError>;

    async fn find(&self, id: PatientId) -> Result<Option<Patient>, StoreError>;

    /// Lowest-id record whose name equals `name` exactly.
    async fn find_first_by_name(&self, name: &str) -> Result<Option<Patient>, StoreError>;

    /// Overwrite the mutable fields. Returns `false` when no row has `id`.
    async fn update(&self, id: PatientId, draft: &PatientDraft) -> Result<bool, StoreError>;

    /// Remove the row with `id`. Returns the number of rows removed.
    async fn delete(&self, id: PatientId) -> Result<usize, StoreError>;

    /// Insert every draft or none of them.
    async fn insert_batch(&self, drafts: &[PatientDraft]) -> Result<usize, StoreError>;
}
