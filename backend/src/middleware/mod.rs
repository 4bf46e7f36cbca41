//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every route, namely trace
//! identifiers and session-based authorization.

pub mod authorize;
pub mod trace;

pub use authorize::{Authorize, CurrentIdentity};
pub use trace::Trace;
