//! Wire PostgreSQL repositories and outbound adapters into driving ports.

use std::sync::Arc;

use actix_web::web;

use clinic_backend::domain::{AuthService, PatientService, PhysicianService, UserDirectoryService};
use clinic_backend::inbound::http::state::HttpState;
use clinic_backend::outbound::persistence::{
    DbPool, DieselAccessCodeRepository, DieselPatientRepository, DieselPhysicianRepository,
    DieselUserAccountRepository,
};
use clinic_backend::outbound::{Argon2CredentialHasher, XlsxSpreadsheetCodec};

/// Build the handler state over a shared pool.
pub(super) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    let accounts = Arc::new(DieselUserAccountRepository::new(pool.clone()));

    let auth = AuthService::new(
        Arc::new(DieselAccessCodeRepository::new(pool.clone())),
        Arc::clone(&accounts),
        Arc::new(Argon2CredentialHasher::new()),
    );
    let patients = PatientService::new(
        Arc::new(DieselPatientRepository::new(pool.clone())),
        Arc::new(XlsxSpreadsheetCodec),
    );
    let physicians = PhysicianService::new(Arc::new(DieselPhysicianRepository::new(pool.clone())));
    let users = UserDirectoryService::new(accounts);

    web::Data::new(HttpState::new(
        Arc::new(auth),
        Arc::new(patients),
        Arc::new(physicians),
        Arc::new(users),
    ))
}
