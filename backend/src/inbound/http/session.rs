//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix cookie session so handlers only bind, read or drop the
//! [`SessionIdentity`] of the signed-in user.

use actix_session::{Session, SessionExt};
use actix_web::dev::{Payload, ServiceRequest};
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, SessionIdentity};

pub(crate) const IDENTITY_KEY: &str = "identity";

/// Newtype wrapper that exposes identity-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Session attached to a request travelling through middleware.
    pub fn from_service_request(req: &ServiceRequest) -> Self {
        Self(req.get_session())
    }

    /// Bind `identity` to the session cookie.
    pub fn persist_identity(&self, identity: &SessionIdentity) -> Result<(), Error> {
        self.0
            .insert(IDENTITY_KEY, identity)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The identity bound to this session, if any.
    ///
    /// An entry that no longer deserialises is dropped and the request is
    /// treated as anonymous.
    pub fn identity(&self) -> Option<SessionIdentity> {
        match self.0.get::<SessionIdentity>(IDENTITY_KEY) {
            Ok(identity) => identity,
            Err(error) => {
                warn!(%error, "discarding unreadable session identity");
                self.0.remove(IDENTITY_KEY);
                None
            }
        }
    }

    /// Drop every session entry. Safe to call on an anonymous session.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
