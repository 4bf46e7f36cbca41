//! Domain primitives, services and ports.
//!
//! Purpose: hold the clinic's business rules independent of HTTP, the
//! database, password hashing and the spreadsheet format. Inbound adapters
//! call the driving ports in [`ports`]; outbound adapters implement the
//! driven ones.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failure payload.
//! - [`Role`], [`SessionIdentity`], [`AccessPolicy`]: authentication and
//!   route authorization.
//! - [`Patient`], [`PatientDraft`], [`PatientSearch`]: patient records.
//! - [`Physician`], [`PhysicianDraft`]: physician directory.
//! - Services implementing the driving ports: [`AuthService`],
//!   [`PatientService`], [`PhysicianService`], [`UserDirectoryService`].

pub mod auth;
mod auth_service;
pub mod authorization;
pub mod error;
mod patient;
pub mod patient_import;
mod patient_service;
mod physician;
mod physician_service;
pub mod ports;
mod role;
mod spreadsheet;
mod trace_id;
mod user;

pub use self::auth::{
    AuthError, CredentialsValidationError, LoginCredentials, Registration, SessionIdentity,
};
pub use self::auth_service::AuthService;
pub use self::authorization::{AccessDecision, AccessPolicy};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::patient::{
    LIVE_SEARCH_LIMIT, Patient, PatientDraft, PatientId, PatientOrder, PatientSearch,
    PatientSummary, PatientValidationError,
};
pub use self::patient_import::{ImportReport, RowRejection};
pub use self::patient_service::PatientService;
pub use self::physician::{MissingField, Physician, PhysicianDraft};
pub use self::physician_service::{PhysicianService, UserDirectoryService};
pub use self::role::{Role, UnknownRole};
pub use self::spreadsheet::{Cell, Sheet, SheetRow};
pub use self::trace_id::TraceId;
pub use self::user::{NewUserAccount, StoredCredentials, UserAccount, UserId};
