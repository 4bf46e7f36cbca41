//! Per-route authorization against the session identity.
//!
//! [`Authorize`] wraps a single route or resource with an [`AccessPolicy`].
//! Allowed requests reach the handler with the identity available through
//! the [`CurrentIdentity`] extractor. Anonymous requests on login-guarded
//! routes are redirected to the login page; everything else that fails the
//! policy gets a 403 page.

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{info, warn};

use crate::domain::{AccessDecision, AccessPolicy, Role, SessionIdentity};
use crate::inbound::http::pages::{LOGIN_PAGE, Page, redirect};
use crate::inbound::http::session::SessionContext;

const STAFF: &[Role] = &[Role::Admin, Role::Medico];

/// Authorization middleware factory.
///
/// # Examples
/// ```
/// use actix_web::{App, HttpResponse, web};
/// use clinic_backend::middleware::Authorize;
///
/// let app = App::new().service(
///     web::resource("/pacientes")
///         .wrap(Authorize::staff())
///         .route(web::get().to(HttpResponse::Ok)),
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Authorize {
    policy: Rc<AccessPolicy>,
}

impl Authorize {
    pub fn new(policy: AccessPolicy) -> Self {
        Self {
            policy: Rc::new(policy),
        }
    }

    /// Any signed-in user.
    pub fn login() -> Self {
        Self::new(AccessPolicy::login())
    }

    /// Signed-in admins and clinicians.
    pub fn staff() -> Self {
        Self::new(AccessPolicy::login().allow_roles(STAFF))
    }

    /// Signed-in admins only.
    pub fn admin() -> Self {
        Self::new(AccessPolicy::login().require_role(Role::Admin))
    }

    /// Admins and clinicians without the login redirect; anonymous requests
    /// are forbidden.
    pub fn staff_only() -> Self {
        Self::new(AccessPolicy::roles_only(STAFF))
    }
}

impl<S, B> Transform<S, ServiceRequest> for Authorize
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthorizeMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthorizeMiddleware {
            service,
            policy: Rc::clone(&self.policy),
        }))
    }
}

/// Service wrapper produced by [`Authorize`].
pub struct AuthorizeMiddleware<S> {
    service: S,
    policy: Rc<AccessPolicy>,
}

impl<S, B> Service<ServiceRequest> for AuthorizeMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let identity = SessionContext::from_service_request(&req).identity();
        match self.policy.evaluate(identity.as_ref()) {
            AccessDecision::Allow => {
                if let Some(identity) = identity {
                    req.extensions_mut().insert(identity);
                }
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            AccessDecision::RedirectToLogin => {
                info!(path = req.path(), "anonymous request redirected to login");
                let response = redirect(LOGIN_PAGE);
                Box::pin(ready(Ok(req.into_response(response).map_into_right_body())))
            }
            AccessDecision::Forbidden => {
                warn!(
                    path = req.path(),
                    username = identity.as_ref().map(|id| id.username.as_str()),
                    role = identity.as_ref().map(|id| id.role.as_str()),
                    "access denied"
                );
                let response = Page::new("Error")
                    .heading("Acceso denegado")
                    .back_button("/")
                    .respond(StatusCode::FORBIDDEN);
                Box::pin(ready(Ok(req.into_response(response).map_into_right_body())))
            }
        }
    }
}

/// Identity admitted by [`Authorize`] for the current request.
///
/// Extraction fails with 401 on routes that are not wrapped by an
/// [`Authorize`] policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentIdentity(pub SessionIdentity);

impl FromRequest for CurrentIdentity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let identity = req.extensions().get::<SessionIdentity>().cloned();
        ready(identity.map(CurrentIdentity).ok_or_else(|| {
            crate::domain::Error::unauthorized("login required").into()
        }))
    }
}
