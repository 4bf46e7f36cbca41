//! PostgreSQL persistence adapters.
//!
//! Each repository implements a driven port from `domain::ports` over a
//! shared [`DbPool`]. Row structs and schema definitions stay private to
//! this module.

mod diesel_access_code_repository;
mod diesel_error_mapping;
mod diesel_patient_repository;
mod diesel_physician_repository;
mod diesel_user_account_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_access_code_repository::DieselAccessCodeRepository;
pub use diesel_patient_repository::DieselPatientRepository;
pub use diesel_physician_repository::DieselPhysicianRepository;
pub use diesel_user_account_repository::DieselUserAccountRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
