//! Patient record service implementing the [`PatientRecords`] port.
//!
//! Spreadsheet decoding and encoding run on the blocking pool because both
//! are CPU-bound.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::patient_import::{export_sheet, parse_rows};
use crate::domain::ports::{
    PatientError, PatientRecords, PatientRepository, SpreadsheetCodec, SpreadsheetError,
};
use crate::domain::{
    ImportReport, LIVE_SEARCH_LIMIT, Patient, PatientDraft, PatientId, PatientOrder,
    PatientSearch, PatientSummary, TraceId,
};

#[derive(Clone)]
pub struct PatientService<R, C> {
    patients: Arc<R>,
    codec: Arc<C>,
}

impl<R, C> PatientService<R, C> {
    pub fn new(patients: Arc<R>, codec: Arc<C>) -> Self {
        Self { patients, codec }
    }
}

#[async_trait]
impl<R, C> PatientRecords for PatientService<R, C>
where
    R: PatientRepository,
    C: SpreadsheetCodec + 'static,
{
    async fn create(&self, draft: &PatientDraft) -> Result<Patient, PatientError> {
        let patient = self.patients.create(draft).await?;
        info!(patient_id = %patient.id, "patient created");
        Ok(patient)
    }

    async fn list(&self, order: PatientOrder) -> Result<Vec<Patient>, PatientError> {
        Ok(self.patients.list(order).await?)
    }

    async fn search(&self, search: &PatientSearch) -> Result<Vec<Patient>, PatientError> {
        Ok(self.patients.search(search, None).await?)
    }

    async fn live_search(&self, term: &str) -> Result<Vec<PatientSummary>, PatientError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        let search = PatientSearch::new(Some(term.to_owned()), None);
        let rows = self
            .patients
            .search(&search, Some(LIVE_SEARCH_LIMIT))
            .await?;
        Ok(rows.into_iter().map(PatientSummary::from).collect())
    }

    async fn find(&self, id: PatientId) -> Result<Patient, PatientError> {
        self.patients
            .find(id)
            .await?
            .ok_or(PatientError::NotFound { id })
    }

    async fn update(&self, id: PatientId, draft: &PatientDraft) -> Result<(), PatientError> {
        if self.patients.update(id, draft).await? {
            info!(patient_id = %id, "patient updated");
            Ok(())
        } else {
            Err(PatientError::NotFound { id })
        }
    }

    async fn delete(&self, id: PatientId) -> Result<(), PatientError> {
        let removed = self.patients.delete(id).await?;
        info!(patient_id = %id, removed, "patient delete processed");
        Ok(())
    }

    async fn find_own(&self, username: &str) -> Result<Option<Patient>, PatientError> {
        Ok(self.patients.find_first_by_name(username).await?)
    }

    async fn import(&self, workbook: &[u8]) -> Result<ImportReport, PatientError> {
        let codec = Arc::clone(&self.codec);
        let bytes = workbook.to_vec();
        let rows = TraceId::spawn_blocking(move || codec.decode(&bytes))
            .await
            .map_err(|err| SpreadsheetError::decode(err.to_string()))??;

        let parsed = parse_rows(rows);
        if parsed.seen == 0 {
            return Err(PatientError::EmptyFile);
        }
        if parsed.drafts.is_empty() {
            warn!(rejected = parsed.rejected.len(), "import rejected every row");
            return Err(PatientError::NoValidRows {
                rejected: parsed.rejected,
            });
        }

        let imported = self.patients.insert_batch(&parsed.drafts).await?;
        info!(imported, rejected = parsed.rejected.len(), "patients imported");
        Ok(ImportReport {
            imported,
            rejected: parsed.rejected,
        })
    }

    async fn export(&self) -> Result<Vec<u8>, PatientError> {
        let patients = self.patients.list(PatientOrder::Insertion).await?;
        if patients.is_empty() {
            return Err(PatientError::NoData);
        }
        let count = patients.len();
        let sheet = export_sheet(patients.into_iter().map(PatientSummary::from).collect());
        let codec = Arc::clone(&self.codec);
        let bytes = TraceId::spawn_blocking(move || codec.encode(&sheet))
            .await
            .map_err(|err| SpreadsheetError::encode(err.to_string()))??;
        info!(count, "patients exported");
        Ok(bytes)
    }
}

#[cfg(test)]
#[path = "patient_service_tests.rs"]
mod tests;
