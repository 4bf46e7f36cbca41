//! Physician directory pages, administrators only.
//!
//! ```text
//! GET  /medicos           table of physicians
//! POST /insertar-medico   medico_name, especialidad
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use super::pages::{Page, PageResult, escape_html, table};
use super::state::HttpState;
use crate::domain::PhysicianDraft;
use crate::middleware::Authorize;

#[derive(Deserialize)]
pub struct PhysicianForm {
    #[serde(default)]
    medico_name: String,
    #[serde(default)]
    especialidad: String,
}

#[get("/medicos", wrap = "Authorize::admin()")]
pub async fn list_physicians(state: web::Data<HttpState>) -> PageResult<HttpResponse> {
    let physicians = state.physicians.list().await?;
    let rows = physicians
        .iter()
        .map(|p| vec![escape_html(&p.name), escape_html(&p.specialty)]);
    Ok(Page::new("Medicos")
        .heading("Medicos Registrados")
        .raw(&table(&["Nombre", "Especialidad"], rows))
        .back_button("/")
        .respond(StatusCode::OK))
}

#[post("/insertar-medico", wrap = "Authorize::admin()")]
pub async fn create_physician(
    state: web::Data<HttpState>,
    form: web::Form<PhysicianForm>,
) -> PageResult<HttpResponse> {
    let draft = PhysicianDraft::try_new(&form.medico_name, &form.especialidad)?;
    let physician = state.physicians.create(&draft).await?;
    Ok(Page::new("Médico guardado")
        .heading(&format!("Médico {} guardado exitosamente.", physician.name))
        .back_button("/")
        .respond(StatusCode::OK))
}
