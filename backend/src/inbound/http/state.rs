//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AuthGate, PatientRecords, PhysicianDirectory, UserDirectory};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AuthGate>,
    pub patients: Arc<dyn PatientRecords>,
    pub physicians: Arc<dyn PhysicianDirectory>,
    pub users: Arc<dyn UserDirectory>,
}

impl HttpState {
    pub fn new(
        auth: Arc<dyn AuthGate>,
        patients: Arc<dyn PatientRecords>,
        physicians: Arc<dyn PhysicianDirectory>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            auth,
            patients,
            physicians,
            users,
        }
    }
}
