//! Route table for the clinic's session-backed pages and endpoints.
//!
//! Health probes are registered separately by the server so they stay
//! outside the session middleware.

use actix_web::web;

use super::auth::{login, logout, register, user_role};
use super::patients::{
    delete_patient, edit_form, edit_list, list_by_heart_rate, list_patients, live_search,
    manage_records, own_record, search_patients, submit_patient, update_patient,
};
use super::physicians::{create_physician, list_physicians};
use super::transfer::{download, upload};
use super::users::list_users;

/// Register every application handler on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(register)
        .service(login)
        .service(logout)
        .service(user_role)
        .service(list_patients)
        .service(list_by_heart_rate)
        .service(manage_records)
        .service(edit_list)
        .service(search_patients)
        .service(live_search)
        .service(edit_form)
        .service(update_patient)
        .service(delete_patient)
        .service(own_record)
        .service(submit_patient)
        .service(download)
        .service(upload)
        .service(list_physicians)
        .service(create_physician)
        .service(list_users);
}
