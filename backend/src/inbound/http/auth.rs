//! Registration, login and logout handlers.
//!
//! ```text
//! POST /registro      nombre_usuario, password, codigo_acceso -> 302 /login.html
//! POST /login         nombre_usuario, password                -> 302 /
//! GET  /logout                                                -> 302 /login.html
//! GET  /tipo-usuario  {"tipo_usuario":"medico"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use super::pages::{LOGIN_PAGE, PageError, PageResult, REGISTER_PAGE, redirect};
use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::{LoginCredentials, Registration, Role};
use crate::middleware::{Authorize, CurrentIdentity};

/// Form posted by the static registration page. Missing fields arrive as
/// empty strings so validation can report them.
#[derive(Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    nombre_usuario: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    codigo_acceso: String,
}

/// Form posted by the static login page.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    nombre_usuario: String,
    #[serde(default)]
    password: String,
}

/// Body of `GET /tipo-usuario`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleResponse {
    pub tipo_usuario: Role,
}

/// Create an account from an access code. Does not sign the user in.
#[post("/registro")]
pub async fn register(
    state: web::Data<HttpState>,
    form: web::Form<RegisterForm>,
) -> PageResult<HttpResponse> {
    let back = |err: PageError| err.back_to(REGISTER_PAGE);
    let registration =
        Registration::try_from_parts(&form.nombre_usuario, &form.password, &form.codigo_acceso)
            .map_err(|err| back(err.into()))?;
    state
        .auth
        .register(&registration)
        .await
        .map_err(|err| back(err.into()))?;
    Ok(redirect(LOGIN_PAGE))
}

/// Verify credentials and bind the identity to the session.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> PageResult<HttpResponse> {
    let back = |err: PageError| err.back_to(LOGIN_PAGE);
    let credentials = LoginCredentials::try_from_parts(&form.nombre_usuario, &form.password)
        .map_err(|err| back(err.into()))?;
    let identity = state
        .auth
        .login(&credentials)
        .await
        .map_err(|err| back(err.into()))?;
    session.persist_identity(&identity)?;
    Ok(redirect("/"))
}

/// Drop the session. Succeeds whether or not anyone was signed in.
#[get("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    redirect(LOGIN_PAGE)
}

#[get("/tipo-usuario", wrap = "Authorize::login()")]
pub async fn user_role(identity: CurrentIdentity) -> web::Json<RoleResponse> {
    web::Json(RoleResponse {
        tipo_usuario: identity.0.role,
    })
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::http::header::LOCATION;
    use actix_web::test;
    use rstest::rstest;

    use super::*;
    use crate::domain::{AuthError, SessionIdentity, UserAccount, UserId};
    use crate::inbound::http::test_utils::{MockPorts, session_cookie, signed_in, test_app};

    fn location<B>(res: &actix_web::dev::ServiceResponse<B>) -> Option<&str> {
        res.headers().get(LOCATION).and_then(|v| v.to_str().ok())
    }

    #[rstest]
    #[actix_web::test]
    async fn register_redirects_to_login_without_signing_in() {
        let mut ports = MockPorts::default();
        ports
            .auth
            .expect_register()
            .withf(|r| r.credentials().username() == "jdoe" && r.access_code() == "DOC1")
            .times(1)
            .returning(|_| {
                Ok(UserAccount {
                    id: UserId::new(3),
                    username: "jdoe".into(),
                    role: Role::Medico,
                })
            });
        let app = test::init_service(test_app(ports.into_state())).await;

        let req = test::TestRequest::post()
            .uri("/registro")
            .set_form([
                ("nombre_usuario", "jdoe"),
                ("password", "pw123"),
                ("codigo_acceso", "DOC1"),
            ])
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), Some(LOGIN_PAGE));
        assert!(res.response().cookies().all(|c| c.name() != "session"));
    }

    #[rstest]
    #[case(|| AuthError::InvalidAccessCode, StatusCode::FORBIDDEN, "Codigo de acceso denegado")]
    #[case(
        || AuthError::DuplicateUsername { username: "jdoe".into() },
        StatusCode::CONFLICT,
        "El usuario ya existe"
    )]
    #[actix_web::test]
    async fn register_failures_render_distinct_pages(
        #[case] failure: fn() -> AuthError,
        #[case] status: StatusCode,
        #[case] message: &str,
    ) {
        let mut ports = MockPorts::default();
        ports
            .auth
            .expect_register()
            .times(1)
            .returning(move |_| Err(failure()));
        let app = test::init_service(test_app(ports.into_state())).await;

        let req = test::TestRequest::post()
            .uri("/registro")
            .set_form([
                ("nombre_usuario", "jdoe"),
                ("password", "pw123"),
                ("codigo_acceso", "NOPE"),
            ])
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), status);
        let body = test::read_body(res).await;
        let html = std::str::from_utf8(&body).expect("utf8");
        assert!(html.contains(message));
        assert!(html.contains(REGISTER_PAGE));
    }

    #[rstest]
    #[actix_web::test]
    async fn register_with_blank_code_never_reaches_the_gate() {
        let app = test::init_service(test_app(MockPorts::default().into_state())).await;
        let req = test::TestRequest::post()
            .uri("/registro")
            .set_form([("nombre_usuario", "jdoe"), ("password", "pw123")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn login_binds_identity_readable_by_tipo_usuario() {
        let mut ports = MockPorts::default();
        ports
            .auth
            .expect_login()
            .withf(|c| c.username() == "jdoe" && c.password() == "pw123")
            .times(1)
            .returning(|_| {
                Ok(SessionIdentity {
                    user_id: UserId::new(3),
                    username: "jdoe".into(),
                    role: Role::Medico,
                })
            });
        let app = test::init_service(test_app(ports.into_state())).await;

        let req = test::TestRequest::post()
            .uri("/login")
            .set_form([("nombre_usuario", "jdoe"), ("password", "pw123")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), Some("/"));
        let cookie = session_cookie(&res);

        let req = test::TestRequest::get()
            .uri("/tipo-usuario")
            .cookie(cookie)
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!({ "tipo_usuario": "medico" }));
    }

    #[rstest]
    #[actix_web::test]
    async fn wrong_password_does_not_bind_a_session() {
        let mut ports = MockPorts::default();
        ports
            .auth
            .expect_login()
            .times(1)
            .returning(|_| Err(AuthError::InvalidPassword));
        let app = test::init_service(test_app(ports.into_state())).await;

        let req = test::TestRequest::post()
            .uri("/login")
            .set_form([("nombre_usuario", "jdoe"), ("password", "nope")])
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.response().cookies().all(|c| c.name() != "session"));
    }

    #[rstest]
    #[actix_web::test]
    async fn logout_is_idempotent() {
        let app = test::init_service(test_app(MockPorts::default().into_state())).await;
        let cookie = signed_in(&app, "jdoe", Role::Admin).await;

        for request in [
            test::TestRequest::get().uri("/logout").cookie(cookie).to_request(),
            test::TestRequest::get().uri("/logout").to_request(),
        ] {
            let res = test::call_service(&app, request).await;
            assert_eq!(res.status(), StatusCode::FOUND);
            assert_eq!(location(&res), Some(LOGIN_PAGE));
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn tipo_usuario_redirects_anonymous_callers() {
        let app = test::init_service(test_app(MockPorts::default().into_state())).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/tipo-usuario").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), Some(LOGIN_PAGE));
    }
}
