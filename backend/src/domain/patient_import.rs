//! Mapping between patient records and spreadsheet rows.
//!
//! Imports validate each row on its own. Malformed rows are reported with
//! their spreadsheet row number and never reach the store; the valid rows are
//! inserted as one atomic batch.

use serde::Serialize;

use super::{Cell, PatientDraft, PatientSummary, PatientValidationError, Sheet, SheetRow};

pub const NAME_COLUMN: &str = "nombre";
pub const AGE_COLUMN: &str = "edad";
pub const HEART_RATE_COLUMN: &str = "frecuencia_cardiaca";

/// Worksheet name used for exports.
pub const EXPORT_SHEET_NAME: &str = "Pacientes";
/// Download file name used for exports.
pub const EXPORT_FILE_NAME: &str = "Reporte_Pacientes.xlsx";

/// A spreadsheet row that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowRejection {
    pub row: u32,
    pub reason: String,
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub rejected: Vec<RowRejection>,
}

/// Valid drafts and per-row rejections from a decoded sheet.
#[derive(Debug, Default)]
pub(crate) struct ParsedRows {
    pub drafts: Vec<PatientDraft>,
    pub rejected: Vec<RowRejection>,
    /// Rows carrying any data, valid or not.
    pub seen: usize,
}

pub(crate) fn parse_rows(rows: Vec<SheetRow>) -> ParsedRows {
    let mut parsed = ParsedRows::default();
    for row in rows.into_iter().filter(|row| !row.is_blank()) {
        parsed.seen += 1;
        match draft_from_row(&row) {
            Ok(draft) => parsed.drafts.push(draft),
            Err(err) => parsed.rejected.push(RowRejection {
                row: row.number,
                reason: err.to_string(),
            }),
        }
    }
    parsed
}

fn draft_from_row(row: &SheetRow) -> Result<PatientDraft, PatientValidationError> {
    let name = text_cell(NAME_COLUMN, row.get(NAME_COLUMN))?;
    let age = integer_cell(AGE_COLUMN, row.get(AGE_COLUMN))?;
    let heart_rate = integer_cell(HEART_RATE_COLUMN, row.get(HEART_RATE_COLUMN))?;
    PatientDraft::try_new(&name, age, heart_rate)
}

fn text_cell(field: &'static str, cell: &Cell) -> Result<String, PatientValidationError> {
    match cell {
        Cell::Text(text) if !text.trim().is_empty() => Ok(text.clone()),
        Cell::Int(_) | Cell::Float(_) | Cell::Bool(_) => Err(PatientValidationError::NotAText {
            field,
        }),
        _ => Err(PatientValidationError::MissingField { field }),
    }
}

fn integer_cell(field: &'static str, cell: &Cell) -> Result<i32, PatientValidationError> {
    let not_an_integer = |value: String| PatientValidationError::NotAnInteger { field, value };
    match cell {
        Cell::Int(value) => i32::try_from(*value).map_err(|_| not_an_integer(value.to_string())),
        Cell::Float(value) => float_to_i32(*value).ok_or_else(|| not_an_integer(value.to_string())),
        Cell::Text(text) => super::patient::parse_integer(field, text),
        Cell::Bool(value) => Err(not_an_integer(value.to_string())),
        Cell::Empty => Err(PatientValidationError::MissingField { field }),
    }
}

fn float_to_i32(value: f64) -> Option<i32> {
    let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
    if value.fract() == 0.0 && in_range {
        Some(value as i32)
    } else {
        None
    }
}

/// Build the export sheet for `patients`.
pub(crate) fn export_sheet(patients: Vec<PatientSummary>) -> Sheet {
    Sheet {
        name: EXPORT_SHEET_NAME.to_owned(),
        columns: [NAME_COLUMN, AGE_COLUMN, HEART_RATE_COLUMN]
            .map(str::to_owned)
            .to_vec(),
        rows: patients
            .into_iter()
            .map(|p| {
                vec![
                    Cell::Text(p.name),
                    Cell::Int(i64::from(p.age)),
                    Cell::Int(i64::from(p.heart_rate)),
                ]
            })
            .collect(),
    }
}
