//! HTTP inbound adapter: HTML pages, form handlers and a few JSON endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod pages;
pub mod patients;
pub mod physicians;
pub mod routes;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod transfer;
pub mod users;

pub use error::ApiResult;
