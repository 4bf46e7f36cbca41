//! Test helpers for inbound HTTP components.

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};
use serde::Deserialize;
use std::sync::Arc;

use super::routes;
use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::ports::{
    MockAuthGate, MockPatientRecords, MockPhysicianDirectory, MockUserDirectory,
};
use crate::domain::{Error, Role, SessionIdentity, UserId};

/// Cookie name shared with the production session middleware.
pub const SESSION_COOKIE: &str = "session";

const SIGN_IN_PATH: &str = "/test/sign-in";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh key per invocation.
/// - Disables the `Secure` flag for plain-HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// The session cookie set by `response`.
///
/// # Panics
/// Panics when the response did not set the session cookie.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Mocked driving ports; unset expectations fail the test when called.
#[derive(Default)]
pub struct MockPorts {
    pub auth: MockAuthGate,
    pub patients: MockPatientRecords,
    pub physicians: MockPhysicianDirectory,
    pub users: MockUserDirectory,
}

impl MockPorts {
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(self.auth),
            Arc::new(self.patients),
            Arc::new(self.physicians),
            Arc::new(self.users),
        ))
    }
}

#[derive(Deserialize)]
struct SignIn {
    username: String,
    role: Role,
}

async fn sign_in(session: SessionContext, query: web::Query<SignIn>) -> Result<HttpResponse, Error> {
    let SignIn { username, role } = query.into_inner();
    session.persist_identity(&SessionIdentity {
        user_id: UserId::new(1),
        username,
        role,
    })?;
    Ok(HttpResponse::Ok().finish())
}

/// Every production route plus a sign-in shortcut, behind a test session.
pub fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(test_session_middleware())
        .app_data(state)
        .route(SIGN_IN_PATH, web::get().to(sign_in))
        .configure(routes::configure)
}

/// Session cookie for `username` signed in with `role`.
pub async fn signed_in<S, B>(app: &S, username: &str, role: Role) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let uri = format!("{SIGN_IN_PATH}?username={username}&role={}", role.as_str());
    let res = test::call_service(app, test::TestRequest::get().uri(&uri).to_request()).await;
    session_cookie(&res)
}
