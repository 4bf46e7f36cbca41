//! Failure modes shared by every record store adapter.

use super::define_port_error;
use crate::domain::Error;

define_port_error! {
    /// Errors raised by record store adapters.
    pub enum StoreError {
        /// No connection could be obtained from the pool.
        Connection { message: String } => "record store connection failed: {message}",
        /// The store did not answer within the configured bound.
        Timeout { operation: String } => "record store timed out during {operation}",
        /// A uniqueness constraint rejected the write.
        Conflict { message: String } => "record store conflict: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "record store query failed: {message}",
    }
}

impl From<StoreError> for Error {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Connection { .. } | StoreError::Timeout { .. } => {
                Error::service_unavailable("El almacén de datos no está disponible")
            }
            StoreError::Conflict { message } => Error::conflict(message),
            StoreError::Query { message } => Error::internal(message),
        }
    }
}
