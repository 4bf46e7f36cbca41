//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **credentials**: Argon2id password hashing
//! - **spreadsheet**: xlsx workbook codec
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod credentials;
pub mod persistence;
pub mod spreadsheet;

pub use credentials::Argon2CredentialHasher;
pub use spreadsheet::XlsxSpreadsheetCodec;
