//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`AuthGate`, `PatientRecords`, `PhysicianDirectory`,
//! `UserDirectory`) are called by inbound adapters. Driven ports are
//! implemented by outbound adapters for persistence, hashing and the
//! spreadsheet format.

mod macros;
pub(crate) use macros::define_port_error;

mod access_code_repository;
mod auth_gate;
mod credential_hasher;
mod patient_records;
mod patient_repository;
mod physician_directory;
mod physician_repository;
mod spreadsheet_codec;
mod store_error;
mod user_account_repository;
mod user_directory;

pub use access_code_repository::AccessCodeRepository;
#[cfg(test)]
pub use access_code_repository::MockAccessCodeRepository;
pub use auth_gate::AuthGate;
#[cfg(test)]
pub use auth_gate::MockAuthGate;
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHashError, CredentialHasher};
#[cfg(test)]
pub use patient_records::MockPatientRecords;
pub use patient_records::{PatientError, PatientRecords};
#[cfg(test)]
pub use patient_repository::MockPatientRepository;
pub use patient_repository::PatientRepository;
#[cfg(test)]
pub use physician_directory::MockPhysicianDirectory;
pub use physician_directory::PhysicianDirectory;
#[cfg(test)]
pub use physician_repository::MockPhysicianRepository;
pub use physician_repository::PhysicianRepository;
#[cfg(test)]
pub use spreadsheet_codec::MockSpreadsheetCodec;
pub use spreadsheet_codec::{SpreadsheetCodec, SpreadsheetError};
pub use store_error::StoreError;
#[cfg(test)]
pub use user_account_repository::MockUserAccountRepository;
pub use user_account_repository::UserAccountRepository;
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::UserDirectory;
