//! Diesel error mapping into [`StoreError`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::StoreError;

/// Map a Diesel error, logging the driver detail and keeping it out of the
/// returned message except for the violated constraint name.
pub(crate) fn map_diesel_error(error: DieselError) -> StoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            StoreError::conflict(info.constraint_name().unwrap_or("unique constraint"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StoreError::connection("database connection error")
        }
        DieselError::NotFound => StoreError::query("record not found"),
        DieselError::QueryBuilderError(_) => StoreError::query("database query error"),
        _ => StoreError::query("database error"),
    }
}

/// Escape LIKE wildcards so user input matches literally.
pub(crate) fn like_contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
