//! Clinic patient-records backend.
//!
//! Hexagonal layout: [`domain`] holds business rules and ports,
//! [`inbound`] exposes them over HTTP, [`outbound`] implements the driven
//! ports against PostgreSQL, Argon2 and xlsx workbooks.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use domain::TraceId;
pub use middleware::Trace;
