//! Login, registration and logout.

use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use actix_web::{HttpRequest, HttpResponse, http::StatusCode, http::header, web};

use scribe_core::AccountError;
use scribe_core::error::ConflictError;
use scribe_core::ports::{AuthError, Layout, View};
use scribe_shared::dto::CredentialsForm;

use super::render;
use super::views::FormContext;
use crate::middleware::auth::verify_session;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn login_view(message: &str) -> AppResult<View> {
    Ok(View::new(
        "admin/index",
        Layout::Login,
        FormContext::new("Admin", "/admin", message),
    )?)
}

fn register_view(message: &str) -> AppResult<View> {
    Ok(View::new(
        "admin/register",
        Layout::Login,
        FormContext::new("Register", "/register", message),
    )?)
}

fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    let max_age = CookieDuration::seconds(state.sessions.lifetime().num_seconds());

    Cookie::build(state.cookie.name.clone(), token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.cookie.secure)
        .max_age(max_age)
        .finish()
}

/// GET /admin
pub async fn login_page(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    render(&state, StatusCode::OK, login_view("")?)
}

/// GET /register
pub async fn register_page(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    render(&state, StatusCode::OK, register_view("")?)
}

/// POST /admin
///
/// Success sets the session cookie and redirects to the dashboard. Bad
/// credentials re-render the login form with a 401.
pub async fn login(
    state: web::Data<AppState>,
    form: web::Form<CredentialsForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    let user = match state
        .accounts
        .authenticate(&form.username, &form.password)
        .await
    {
        Ok(user) => user,
        Err(AccountError::Auth(AuthError::BadCredentials(_))) => {
            return render(
                &state,
                StatusCode::UNAUTHORIZED,
                login_view("Invalid credentials.")?,
            );
        }
        Err(e) => return Err(e.into()),
    };

    let token = state.sessions.issue(user.id)?;

    Ok(HttpResponse::SeeOther()
        .cookie(session_cookie(&state, token))
        .insert_header((header::LOCATION, "/dashboard"))
        .finish())
}

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    form: web::Form<CredentialsForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    match state.accounts.register(&form.username, &form.password).await {
        Ok(_) => render(
            &state,
            StatusCode::CREATED,
            login_view("User successfully created.")?,
        ),
        Err(AccountError::Conflict(ConflictError::DuplicateUsername(_))) => render(
            &state,
            StatusCode::CONFLICT,
            register_view("User already in use.")?,
        ),
        Err(AccountError::Validation(msg)) => {
            render(&state, StatusCode::BAD_REQUEST, register_view(&msg)?)
        }
        Err(e) => {
            tracing::error!(error = %e, "Registration failed");
            render(
                &state,
                StatusCode::INTERNAL_SERVER_ERROR,
                register_view("Internal server error.")?,
            )
        }
    }
}

/// GET /logout
///
/// Revokes the presented session, if any, and clears the cookie.
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let cookie = req.cookie(&state.cookie.name);

    if let Ok(claims) = verify_session(&state, cookie.as_ref().map(|c| c.value())).await {
        state
            .denylist
            .revoke(claims.token_id, claims.expires_at)
            .await;
        tracing::info!(user_id = %claims.user_id, "Logged out");
    }

    let mut removal = Cookie::build(state.cookie.name.clone(), "")
        .path("/")
        .http_only(true)
        .finish();
    removal.make_removal();

    HttpResponse::SeeOther()
        .cookie(removal)
        .insert_header((header::LOCATION, "/"))
        .finish()
}
