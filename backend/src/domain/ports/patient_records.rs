//! Driving port for patient record management.

use async_trait::async_trait;
use serde_json::json;

use super::{SpreadsheetError, StoreError};
use crate::domain::{
    Error, ImportReport, Patient, PatientDraft, PatientId, PatientOrder, PatientSearch,
    PatientSummary, PatientValidationError, RowRejection,
};

/// Tagged failures of patient operations.
#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error(transparent)]
    Validation(#[from] PatientValidationError),
    /// No patient has the requested id.
    #[error("patient {id} not found")]
    NotFound { id: PatientId },
    /// The uploaded workbook has no data rows.
    #[error("spreadsheet has no data rows")]
    EmptyFile,
    /// Every data row was malformed; nothing was written.
    #[error("no importable rows ({} rejected)", rejected.len())]
    NoValidRows { rejected: Vec<RowRejection> },
    /// Export requested with no stored patients.
    #[error("no patients to export")]
    NoData,
    #[error(transparent)]
    Codec(#[from] SpreadsheetError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<PatientError> for Error {
    fn from(value: PatientError) -> Self {
        match value {
            PatientError::Validation(err) => Error::invalid_request(err.to_string()),
            PatientError::NotFound { id } => {
                Error::not_found(format!("No existe el paciente {id}"))
            }
            PatientError::EmptyFile => Error::invalid_request("El archivo Excel está vacío."),
            PatientError::NoValidRows { rejected } => {
                Error::invalid_request("Ninguna fila del archivo es válida.")
                    .with_details(json!({ "rejected": rejected }))
            }
            PatientError::NoData => Error::not_found("No hay pacientes para exportar."),
            PatientError::Codec(SpreadsheetError::Decode { .. }) => {
                Error::invalid_file("El archivo no es una hoja de cálculo válida.")
            }
            PatientError::Codec(err @ SpreadsheetError::Encode { .. }) => {
                Error::internal(err.to_string())
            }
            PatientError::Store(err) => err.into(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientRecords: Send + Sync {
    async fn create(&self, draft: &PatientDraft) -> Result<Patient, PatientError>;

    async fn list(&self, order: PatientOrder) -> Result<Vec<Patient>, PatientError>;

    /// Rows matching the filters. An empty vector means no matches.
    async fn search(&self, search: &PatientSearch) -> Result<Vec<Patient>, PatientError>;

    /// Name-contains search capped at ten rows; a blank term yields nothing.
    async fn live_search(&self, term: &str) -> Result<Vec<PatientSummary>, PatientError>;

    async fn find(&self, id: PatientId) -> Result<Patient, PatientError>;

    async fn update(&self, id: PatientId, draft: &PatientDraft) -> Result<(), PatientError>;

    /// Deleting an id that does not exist succeeds.
    async fn delete(&self, id: PatientId) -> Result<(), PatientError>;

    /// Record whose name equals `username`, lowest id first.
    async fn find_own(&self, username: &str) -> Result<Option<Patient>, PatientError>;

    async fn import(&self, workbook: &[u8]) -> Result<ImportReport, PatientError>;

    /// Workbook bytes with every patient.
    async fn export(&self) -> Result<Vec<u8>, PatientError>;
}
