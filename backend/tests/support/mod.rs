//! Shared app assembly for integration tests.
//!
//! Wires the real domain services over the in-memory adapters from
//! `clinic_backend::test_support`, behind a session middleware with a fixed
//! key and insecure cookies so plain test requests round-trip.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};

use clinic_backend::domain::{
    AuthService, PatientService, PhysicianService, Role, UserDirectoryService,
};
use clinic_backend::inbound::http::routes;
use clinic_backend::inbound::http::state::HttpState;
use clinic_backend::outbound::XlsxSpreadsheetCodec;
use clinic_backend::test_support::{
    InMemoryAccessCodes, InMemoryPatients, InMemoryPhysicians, InMemoryUserAccounts,
    PlainCredentialHasher,
};

pub const SESSION_COOKIE: &str = "session";

/// Access codes provisioned for every test app.
pub const ADMIN_CODE: &str = "ADM1";
pub const DOCTOR_CODE: &str = "DOC1";
pub const PATIENT_CODE: &str = "PAC1";

/// Handles onto the in-memory stores behind a test app.
pub struct Stores {
    pub accounts: Arc<InMemoryUserAccounts>,
    pub patients: Arc<InMemoryPatients>,
}

pub fn http_state() -> (web::Data<HttpState>, Stores) {
    let accounts = Arc::new(InMemoryUserAccounts::default());
    let patients = Arc::new(InMemoryPatients::default());
    let codes = InMemoryAccessCodes::new([
        (ADMIN_CODE, Role::Admin),
        (DOCTOR_CODE, Role::Medico),
        (PATIENT_CODE, Role::Patient),
    ]);

    let state = HttpState::new(
        Arc::new(AuthService::new(
            Arc::new(codes),
            Arc::clone(&accounts),
            Arc::new(PlainCredentialHasher),
        )),
        Arc::new(PatientService::new(
            Arc::clone(&patients),
            Arc::new(XlsxSpreadsheetCodec),
        )),
        Arc::new(PhysicianService::new(Arc::new(InMemoryPhysicians::default()))),
        Arc::new(UserDirectoryService::new(Arc::clone(&accounts))),
    );
    (web::Data::new(state), Stores { accounts, patients })
}

/// Initialise the full route table over fresh stores.
pub async fn init_app() -> (
    impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    Stores,
) {
    let (state, stores) = http_state();
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::from(&[7u8; 64]))
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build();
    let app = test::init_service(
        App::new()
            .wrap(session)
            .app_data(state)
            .configure(routes::configure),
    )
    .await;
    (app, stores)
}

pub async fn register<S>(app: &S, username: &str, password: &str, code: &str) -> ServiceResponse
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri("/registro")
        .set_form([
            ("nombre_usuario", username),
            ("password", password),
            ("codigo_acceso", code),
        ])
        .to_request();
    test::call_service(app, req).await
}

pub async fn login<S>(app: &S, username: &str, password: &str) -> ServiceResponse
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri("/login")
        .set_form([("nombre_usuario", username), ("password", password)])
        .to_request();
    test::call_service(app, req).await
}

/// Register and sign in, returning the session cookie.
///
/// # Panics
/// Panics when login does not set a session cookie.
pub async fn signed_in_as<S>(app: &S, username: &str, code: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    register(app, username, "pw123", code).await;
    let res = login(app, username, "pw123").await;
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
        .expect("login sets the session cookie")
}

pub async fn body_text(res: ServiceResponse) -> String {
    String::from_utf8(test::read_body(res).await.to_vec()).expect("utf8 body")
}
