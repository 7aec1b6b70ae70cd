//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;
mod public;
mod views;

use actix_web::{HttpResponse, http::StatusCode, http::header, web};
use uuid::Uuid;

use scribe_core::pagination::{self, PageNumber};
use scribe_core::ports::{Layout, View};

use crate::middleware::auth::AuthGate;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Configure all application routes.
///
/// Admin resources are wrapped in [`AuthGate`]; everything else is public.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route("/", web::get().to(public::home))
        .route("/post/{id}", web::get().to(public::show_post))
        .route("/search", web::post().to(public::search))
        .route("/about", web::get().to(public::about))
        .route("/contact", web::get().to(public::contact))
        .route("/health", web::get().to(health::health_check))
        // Session routes
        .service(
            web::resource("/admin")
                .route(web::get().to(auth::login_page))
                .route(web::post().to(auth::login)),
        )
        .service(
            web::resource("/register")
                .route(web::get().to(auth::register_page))
                .route(web::post().to(auth::register)),
        )
        .route("/logout", web::get().to(auth::logout))
        // Admin routes
        .service(
            web::resource("/dashboard")
                .wrap(AuthGate)
                .route(web::get().to(posts::dashboard)),
        )
        .service(
            web::resource("/adminHome")
                .wrap(AuthGate)
                .route(web::get().to(posts::admin_home)),
        )
        .service(
            web::resource("/add-post")
                .wrap(AuthGate)
                .route(web::get().to(posts::new_post_form))
                .route(web::post().to(posts::create_post)),
        )
        .service(
            web::resource("/edit-post/{id}")
                .wrap(AuthGate)
                .route(web::get().to(posts::edit_post_form))
                .route(web::put().to(posts::update_post)),
        )
        .service(
            web::resource("/delete-post/{id}")
                .wrap(AuthGate)
                .route(web::delete().to(posts::delete_post)),
        );
}

/// Render a view with the configured engine.
fn render(state: &AppState, status: StatusCode, view: View) -> AppResult<HttpResponse> {
    let rendered = state.views.render(&view)?;

    Ok(HttpResponse::build(status)
        .content_type(rendered.content_type)
        .body(rendered.body))
}

/// `303 See Other` to `location`.
fn redirect(location: impl Into<String>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.into()))
        .finish()
}

/// Post ids that do not parse cannot exist.
fn parse_post_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("Post {} not found", raw)))
}

/// Shared by the public home page and the admin listing.
async fn listing(
    state: &AppState,
    raw_page: Option<&str>,
    layout: Layout,
    current_route: &'static str,
    url_ext: &'static str,
    user_id: Option<Uuid>,
) -> AppResult<HttpResponse> {
    let page = pagination::recent_posts(state.posts.as_ref(), PageNumber::parse(raw_page)).await?;
    let context = views::ListingContext::new(&page, current_route, url_ext, user_id);

    render(state, StatusCode::OK, View::new("index", layout, context)?)
}
