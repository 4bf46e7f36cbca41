//! Account listing for administrators.
//!
//! ```text
//! GET /ver-usuarios   table of id, username and role
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, web};

use super::pages::{Page, PageResult, escape_html, table};
use super::state::HttpState;
use crate::middleware::Authorize;

/// Registered accounts. Password hashes never leave the store adapter.
#[get("/ver-usuarios", wrap = "Authorize::admin()")]
pub async fn list_users(state: web::Data<HttpState>) -> PageResult<HttpResponse> {
    let accounts = state.users.list_accounts().await?;
    let rows = accounts.iter().map(|account| {
        vec![
            account.id.to_string(),
            escape_html(&account.username),
            account.role.as_str().to_owned(),
        ]
    });
    Ok(Page::new("Usuarios")
        .heading("Usuarios Registrados")
        .raw(&table(&["ID", "Usuario", "Tipo"], rows))
        .back_button("/")
        .respond(StatusCode::OK))
}
