//! Spreadsheet export and bulk import.
//!
//! ```text
//! GET  /download-pacientes  -> Reporte_Pacientes.xlsx
//! POST /upload-pacientes    multipart field `archivoExcel` -> import summary
//! ```

use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, get, post, web};
use futures_util::TryStreamExt as _;
use tracing::warn;

use super::pages::{Page, PageError, PageResult, escape_html, table};
use super::state::HttpState;
use crate::domain::patient_import::EXPORT_FILE_NAME;
use crate::domain::ports::PatientError;
use crate::domain::{Error, RowRejection};
use crate::middleware::Authorize;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const UPLOAD_FIELD: &str = "archivoExcel";
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[get("/download-pacientes", wrap = "Authorize::staff()")]
pub async fn download(state: web::Data<HttpState>) -> PageResult<HttpResponse> {
    let workbook = state.patients.export().await?;
    Ok(HttpResponse::Ok()
        .content_type(XLSX_MIME)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(EXPORT_FILE_NAME.to_owned())],
        })
        .body(workbook))
}

/// Import the uploaded workbook. Valid rows are stored together; malformed
/// rows are listed with their spreadsheet row number.
#[post("/upload-pacientes", wrap = "Authorize::staff()")]
pub async fn upload(
    state: web::Data<HttpState>,
    payload: Multipart,
) -> PageResult<HttpResponse> {
    let workbook = read_upload(payload).await?;
    match state.patients.import(&workbook).await {
        Ok(report) => {
            let page = Page::new("Éxito")
                .heading("¡Éxito!")
                .paragraph(&format!("Se importaron {} pacientes.", report.imported));
            Ok(with_rejections(page, &report.rejected)
                .back_button("/")
                .respond(StatusCode::OK))
        }
        Err(PatientError::NoValidRows { rejected }) => {
            let page = Page::new("Error").heading("Ninguna fila del archivo es válida.");
            Ok(with_rejections(page, &rejected)
                .back_button("/")
                .respond(StatusCode::BAD_REQUEST))
        }
        Err(err) => Err(err.into()),
    }
}

fn with_rejections(page: Page, rejected: &[RowRejection]) -> Page {
    if rejected.is_empty() {
        return page;
    }
    let rows = rejected
        .iter()
        .map(|r| vec![r.row.to_string(), escape_html(&r.reason)]);
    page.paragraph(&format!("Filas rechazadas: {}", rejected.len()))
        .raw(&table(&["Fila", "Motivo"], rows))
}

async fn read_upload(mut payload: Multipart) -> PageResult<Vec<u8>> {
    let unreadable = |err: actix_multipart::MultipartError| {
        warn!(error = %err, "multipart upload could not be read");
        PageError::new(Error::invalid_request("No se pudo leer el archivo."))
    };

    while let Some(mut field) = payload.try_next().await.map_err(unreadable)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(unreadable)? {
            if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
                return Err(PageError::new(Error::invalid_request(
                    "El archivo supera el tamaño máximo permitido.",
                )));
            }
            bytes.extend_from_slice(&chunk);
        }
        if bytes.is_empty() {
            break;
        }
        return Ok(bytes);
    }
    Err(PageError::new(Error::invalid_request(
        "No se seleccionó ningún archivo.",
    )))
}
