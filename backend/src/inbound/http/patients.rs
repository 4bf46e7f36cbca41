//! Patient record pages.
//!
//! ```text
//! GET  /pacientes              table, insertion order           staff
//! GET  /ordenar-pacientes      table, heart rate descending     staff
//! GET  /gestionar-registros    editable table                   admin
//! GET  /editar-pacientes       editable table                   staff
//! GET  /buscar-pacientes       ?name_search=&age_search=        staff
//! GET  /buscar-pacientes-live  ?term= -> JSON, at most 10 rows  staff
//! GET  /editar-paciente/{id}   edit form                        staff
//! POST /actualizar-paciente    id_paciente, name, age, heart_rate -> 302
//! POST /eliminar-paciente      id_paciente -> 302
//! GET  /ver-mis-datos          own record by name               signed in
//! POST /submit-data            name, age, heart_rate            staff, no redirect
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use super::ApiResult;
use super::pages::{Page, PageError, PageResult, escape_html, patient_cells, redirect, table};
use super::state::HttpState;
use crate::domain::{Patient, PatientDraft, PatientId, PatientOrder, PatientSearch, PatientSummary};
use crate::middleware::{Authorize, CurrentIdentity};

const EDIT_LIST_PAGE: &str = "/editar-pacientes";
const PATIENT_HEADERS: [&str; 3] = ["Nombre", "Edad", "Frecuencia Cardiaca (bpm)"];

/// Patient fields as posted by the entry and edit forms.
#[derive(Deserialize)]
pub struct PatientForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    age: String,
    #[serde(default)]
    heart_rate: String,
}

impl PatientForm {
    fn draft(&self) -> PageResult<PatientDraft> {
        Ok(PatientDraft::from_form(&self.name, &self.age, &self.heart_rate)?)
    }
}

#[derive(Deserialize)]
pub struct UpdateForm {
    #[serde(default)]
    id_paciente: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    age: String,
    #[serde(default)]
    heart_rate: String,
}

#[derive(Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    id_paciente: String,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    name_search: Option<String>,
    age_search: Option<String>,
}

#[derive(Deserialize)]
pub struct LiveSearchQuery {
    #[serde(default)]
    term: String,
}

fn listing_page(title: &str, heading: &str, patients: &[Patient]) -> HttpResponse {
    let rows = patients.iter().map(patient_cells);
    Page::new(title)
        .heading(heading)
        .raw(&table(&PATIENT_HEADERS, rows))
        .back_button("/")
        .respond(StatusCode::OK)
}

fn editable_page(title: &str, heading: &str, patients: &[Patient]) -> HttpResponse {
    let headers = ["Nombre", "Edad", "Frec. Cardiaca", "Editar", "Eliminar"];
    let rows = patients.iter().map(|patient| {
        let mut cells = patient_cells(patient);
        cells.push(format!(
            "<a href=\"/editar-paciente/{id}\">Editar</a>",
            id = patient.id
        ));
        cells.push(format!(
            "<form action=\"/eliminar-paciente\" method=\"POST\">\
             <input type=\"hidden\" name=\"id_paciente\" value=\"{id}\">\
             <button type=\"submit\">Eliminar</button></form>",
            id = patient.id
        ));
        cells
    });
    Page::new(title)
        .heading(heading)
        .raw(&table(&headers, rows))
        .back_button("/")
        .respond(StatusCode::OK)
}

#[get("/pacientes", wrap = "Authorize::staff()")]
pub async fn list_patients(state: web::Data<HttpState>) -> PageResult<HttpResponse> {
    let patients = state.patients.list(PatientOrder::Insertion).await?;
    Ok(listing_page("Pacientes", "Pacientes Registrados", &patients))
}

#[get("/ordenar-pacientes", wrap = "Authorize::staff()")]
pub async fn list_by_heart_rate(state: web::Data<HttpState>) -> PageResult<HttpResponse> {
    let patients = state.patients.list(PatientOrder::HeartRateDescending).await?;
    Ok(listing_page(
        "Pacientes Ordenados",
        "Pacientes Ordenados por Frecuencia Cardiaca",
        &patients,
    ))
}

#[get("/gestionar-registros", wrap = "Authorize::admin()")]
pub async fn manage_records(state: web::Data<HttpState>) -> PageResult<HttpResponse> {
    let patients = state.patients.list(PatientOrder::Insertion).await?;
    Ok(editable_page(
        "Gestionar Registros",
        "Gestionar Registros de Pacientes (Admin)",
        &patients,
    ))
}

#[get("/editar-pacientes", wrap = "Authorize::staff()")]
pub async fn edit_list(state: web::Data<HttpState>) -> PageResult<HttpResponse> {
    let patients = state.patients.list(PatientOrder::Insertion).await?;
    Ok(editable_page("Editar Pacientes", "Editar Pacientes", &patients))
}

/// Name-contains and exact-age filters; either may be omitted.
#[get("/buscar-pacientes", wrap = "Authorize::staff()")]
pub async fn search_patients(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> PageResult<HttpResponse> {
    let search = PatientSearch::from_query(query.name_search.as_deref(), query.age_search.as_deref())?;
    let patients = state.patients.search(&search).await?;
    let page = Page::new("Resultados de Búsqueda").heading("Resultados de Búsqueda");
    let page = if patients.is_empty() {
        page.paragraph("No se encontraron pacientes.")
    } else {
        page.raw(&table(&PATIENT_HEADERS, patients.iter().map(patient_cells)))
    };
    Ok(page.back_button("/").respond(StatusCode::OK))
}

/// JSON rows for the search-as-you-type box.
#[get("/buscar-pacientes-live", wrap = "Authorize::staff()")]
pub async fn live_search(
    state: web::Data<HttpState>,
    query: web::Query<LiveSearchQuery>,
) -> ApiResult<web::Json<Vec<PatientSummary>>> {
    let rows = state.patients.live_search(&query.term).await?;
    Ok(web::Json(rows))
}

#[get("/editar-paciente/{id}", wrap = "Authorize::staff()")]
pub async fn edit_form(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> PageResult<HttpResponse> {
    let id: PatientId = path.parse()?;
    let patient = state
        .patients
        .find(id)
        .await
        .map_err(|err| PageError::from(err).back_to(EDIT_LIST_PAGE))?;

    let name = escape_html(&patient.name);
    let form = format!(
        "<form action=\"/actualizar-paciente\" method=\"POST\">\
         <input type=\"hidden\" name=\"id_paciente\" value=\"{id}\">\
         <label for=\"name\">Nombre del paciente:</label>\
         <input type=\"text\" id=\"name\" name=\"name\" value=\"{name}\">\
         <label for=\"age\">Edad:</label>\
         <input type=\"number\" id=\"age\" name=\"age\" value=\"{age}\">\
         <label for=\"heart-rate\">Frecuencia Cardiaca (bpm):</label>\
         <input type=\"number\" id=\"heart-rate\" name=\"heart_rate\" value=\"{heart_rate}\">\
         <button type=\"submit\">Actualizar</button></form>",
        id = patient.id,
        age = patient.age,
        heart_rate = patient.heart_rate,
    );
    Ok(Page::new("Editando Paciente")
        .heading(&format!("Editando a {}", patient.name))
        .raw(&form)
        .back_button(EDIT_LIST_PAGE)
        .respond(StatusCode::OK))
}

/// Overwrite name, age and heart rate of an existing record.
#[post("/actualizar-paciente", wrap = "Authorize::staff()")]
pub async fn update_patient(
    state: web::Data<HttpState>,
    form: web::Form<UpdateForm>,
) -> PageResult<HttpResponse> {
    let id: PatientId = form.id_paciente.parse()?;
    let draft = PatientDraft::from_form(&form.name, &form.age, &form.heart_rate)?;
    state
        .patients
        .update(id, &draft)
        .await
        .map_err(|err| PageError::from(err).back_to(EDIT_LIST_PAGE))?;
    Ok(redirect(EDIT_LIST_PAGE))
}

/// Delete by id; a missing id is not an error.
#[post("/eliminar-paciente", wrap = "Authorize::staff()")]
pub async fn delete_patient(
    state: web::Data<HttpState>,
    form: web::Form<DeleteForm>,
) -> PageResult<HttpResponse> {
    let id: PatientId = form.id_paciente.parse()?;
    state.patients.delete(id).await?;
    Ok(redirect(EDIT_LIST_PAGE))
}

/// The signed-in user's record, matched by patient name equal to username.
#[get("/ver-mis-datos", wrap = "Authorize::login()")]
pub async fn own_record(
    state: web::Data<HttpState>,
    identity: CurrentIdentity,
) -> PageResult<HttpResponse> {
    let username = identity.0.username;
    let page = Page::new("Mis Datos").heading("Mis Datos de Paciente");
    let page = match state.patients.find_own(&username).await? {
        Some(patient) => page.raw(&table(&PATIENT_HEADERS, [patient_cells(&patient)])),
        None => page.paragraph(&format!(
            "No se encontraron datos de paciente asociados a tu usuario ({username})."
        )),
    };
    Ok(page.back_button("/").respond(StatusCode::OK))
}

#[post("/submit-data", wrap = "Authorize::staff_only()")]
pub async fn submit_patient(
    state: web::Data<HttpState>,
    form: web::Form<PatientForm>,
) -> PageResult<HttpResponse> {
    let draft = form.draft()?;
    let patient = state.patients.create(&draft).await?;
    Ok(Page::new("Correctamente")
        .heading("Guardado Exitosamente")
        .paragraph(&format!("Paciente {} registrado.", patient.name))
        .back_button("/")
        .respond(StatusCode::OK))
}

#[cfg(test)]
#[path = "patients_tests.rs"]
mod tests;
