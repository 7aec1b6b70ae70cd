//! Public pages.

use actix_web::{HttpResponse, http::StatusCode, web};

use scribe_core::ports::{Layout, View};
use scribe_core::search::SearchTerm;
use scribe_shared::dto::{PageQuery, SearchForm};

use super::views::{FormContext, Locals, PostContext, PostsContext};
use super::{listing, parse_post_id, render};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /?page=N
pub async fn home(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    listing(&state, query.page.as_deref(), Layout::Main, "/", "/?page=", None).await
}

/// GET /post/{id}
pub async fn show_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let raw = path.into_inner();
    let id = parse_post_id(&raw)?;

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;

    let context = PostContext {
        locals: Locals::new("Scribe"),
        data: &post,
        current_route: format!("/post/{}", id),
        user_id: None,
    };

    render(&state, StatusCode::OK, View::new("post", Layout::Main, context)?)
}

/// POST /search
pub async fn search(
    state: web::Data<AppState>,
    form: web::Form<SearchForm>,
) -> AppResult<HttpResponse> {
    let term = SearchTerm::sanitize(&form.search_term);
    let posts = state.posts.search(&term).await?;

    tracing::debug!(term = term.as_str(), results = posts.len(), "Search");

    let context = PostsContext {
        locals: Locals::new("Search"),
        data: &posts,
        current_route: "/search",
        search_term: Some(term.as_str()),
        user_id: None,
    };

    render(&state, StatusCode::OK, View::new("search", Layout::Main, context)?)
}

/// GET /about
pub async fn about(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let context = FormContext::new("About", "/about", "");
    render(&state, StatusCode::OK, View::new("about", Layout::Main, context)?)
}

/// GET /contact
pub async fn contact(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let context = FormContext::new("Contact", "/contact", "");
    render(&state, StatusCode::OK, View::new("contact", Layout::Main, context)?)
}
