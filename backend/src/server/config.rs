//! HTTP server configuration object.

use actix_web::cookie::{Key, SameSite};
use clinic_backend::outbound::persistence::DbPool;
use std::net::SocketAddr;

/// Everything needed to start the listener.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        same_site: SameSite,
        bind_addr: SocketAddr,
        db_pool: DbPool,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool,
        }
    }
}
