//! Auth gate middleware and the identity extractor.

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse, ResponseError,
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    web,
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::rc::Rc;

use scribe_core::ports::{AuthError, SessionClaims};
use scribe_shared::ErrorResponse;

use crate::state::AppState;

/// The authenticated user, attached to the request by [`AuthGate`].
///
/// ```ignore
/// async fn dashboard(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: uuid::Uuid,
    pub token_id: uuid::Uuid,
}

impl From<SessionClaims> for Identity {
    fn from(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.user_id,
            token_id: claims.token_id,
        }
    }
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Unauthorized().json(ErrorResponse::unauthorized())
    }
}

/// Identity set by the gate. Handlers outside a gated resource get a 401.
impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Identity>()
                .cloned()
                .ok_or(AuthenticationError(AuthError::InvalidOrMissing)),
        )
    }
}

/// Verify the session cookie carried by a request.
///
/// Absent, malformed, expired, tampered and revoked tokens all fail with
/// [`AuthError::InvalidOrMissing`].
pub async fn verify_session(
    state: &AppState,
    cookie_value: Option<&str>,
) -> Result<SessionClaims, AuthError> {
    let token = cookie_value
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::InvalidOrMissing)?;
    let claims = state.sessions.verify(token)?;

    if state.denylist.is_revoked(claims.token_id).await {
        tracing::debug!(token_id = %claims.token_id, "Revoked session token presented");
        return Err(AuthError::InvalidOrMissing);
    }

    Ok(claims)
}

/// Gate for admin resources.
///
/// Runs before the wrapped handler: a verified session cookie attaches an
/// [`Identity`] to the request, anything else ends the request with 401 and
/// the handler never runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthGate;

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthGateService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            match authenticate(&req).await {
                Ok(identity) => {
                    tracing::debug!(
                        user_id = %identity.user_id,
                        token_id = %identity.token_id,
                        path = %req.path(),
                        "Session accepted"
                    );
                    req.extensions_mut().insert(identity);

                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(e) => {
                    tracing::info!(path = %req.path(), "Rejected unauthenticated admin request");

                    let response = AuthenticationError(e).error_response();
                    let (http_req, _payload) = req.into_parts();
                    Ok(ServiceResponse::new(http_req, response).map_into_right_body())
                }
            }
        })
    }
}

async fn authenticate(req: &ServiceRequest) -> Result<Identity, AuthError> {
    let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
        tracing::error!("AppState not found in app data");
        return Err(AuthError::InvalidOrMissing);
    };

    let cookie = req.cookie(&state.cookie.name);
    let claims = verify_session(&state, cookie.as_ref().map(|c| c.value())).await?;

    Ok(Identity::from(claims))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, cookie::Cookie, http::StatusCode, test};
    use chrono::{TimeDelta, Utc};
    use scribe_core::ports::SessionTokens;
    use scribe_infra::{JwtConfig, JwtSessionTokens};
    use uuid::Uuid;

    use crate::test_support::test_state;

    async fn whoami(identity: Identity) -> HttpResponse {
        HttpResponse::Ok().body(identity.user_id.to_string())
    }

    async fn call_with(state: AppState, cookie: Option<Cookie<'static>>) -> (StatusCode, String) {
        let app = test::init_service(
            App::new().app_data(web::Data::new(state)).service(
                web::resource("/protected")
                    .wrap(AuthGate)
                    .route(web::get().to(whoami)),
            ),
        )
        .await;

        let mut req = test::TestRequest::get().uri("/protected");
        if let Some(cookie) = cookie {
            req = req.cookie(cookie);
        }

        let res = test::call_service(&app, req.to_request()).await;
        let status = res.status();
        let body = test::read_body(res).await;
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[actix_rt::test]
    async fn test_valid_cookie_passes() {
        let state = test_state();
        let user_id = Uuid::new_v4();
        let token = state.sessions.issue(user_id).unwrap();

        let (status, body) = call_with(state, Some(Cookie::new("token", token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, user_id.to_string());
    }

    #[actix_rt::test]
    async fn test_missing_cookie_rejected() {
        let (status, _) = call_with(test_state(), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn test_tampered_cookie_rejected() {
        let state = test_state();
        let mut token = state.sessions.issue(Uuid::new_v4()).unwrap();
        let last = token.pop().unwrap();
        token.push(if last == 'A' { 'B' } else { 'A' });

        let (status, _) = call_with(state, Some(Cookie::new("token", token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn test_expired_cookie_rejected() {
        let state = test_state();
        let expired = JwtSessionTokens::new(JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: -2,
            issuer: "scribe".to_string(),
        })
        .issue(Uuid::new_v4())
        .unwrap();

        let (status, _) = call_with(state, Some(Cookie::new("token", expired))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn test_revoked_cookie_rejected() {
        let state = test_state();
        let token = state.sessions.issue(Uuid::new_v4()).unwrap();
        let claims = state.sessions.verify(&token).unwrap();
        state
            .denylist
            .revoke(claims.token_id, Utc::now() + TimeDelta::hours(1))
            .await;

        let (status, _) = call_with(state, Some(Cookie::new("token", token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
