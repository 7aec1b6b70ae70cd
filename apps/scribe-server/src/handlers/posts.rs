//! Admin post management. Every handler here sits behind the auth gate.

use actix_web::{HttpResponse, http::StatusCode, web};

use scribe_core::domain::PostDraft;
use scribe_core::ports::{Layout, View};
use scribe_shared::dto::{PageQuery, PostForm};

use super::views::{FormContext, Locals, PostContext, PostsContext};
use super::{listing, parse_post_id, redirect, render};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn draft_from(form: PostForm) -> AppResult<PostDraft> {
    if form.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    Ok(PostDraft {
        title: form.title,
        body: form.body,
    })
}

/// GET /dashboard
pub async fn dashboard(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list_all().await?;

    let context = PostsContext {
        locals: Locals::new("Dashboard"),
        data: &posts,
        current_route: "/dashboard",
        search_term: None,
        user_id: Some(identity.user_id),
    };

    render(
        &state,
        StatusCode::OK,
        View::new("admin/dashboard", Layout::Admin, context)?,
    )
}

/// GET /adminHome?page=N
pub async fn admin_home(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    listing(
        &state,
        query.page.as_deref(),
        Layout::Admin,
        "/adminHome",
        "/adminHome?page=",
        Some(identity.user_id),
    )
    .await
}

/// GET /add-post
pub async fn new_post_form(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let context = FormContext::new("Add Post", "/add-post", "").for_user(identity.user_id);

    render(
        &state,
        StatusCode::OK,
        View::new("admin/add-post", Layout::Admin, context)?,
    )
}

/// POST /add-post
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create(draft_from(form.into_inner())?).await?;

    tracing::info!(post_id = %post.id, user_id = %identity.user_id, "Post created");

    Ok(redirect("/dashboard"))
}

/// GET /edit-post/{id}
pub async fn edit_post_form(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_post_id(&path.into_inner())?;

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;

    let context = PostContext {
        locals: Locals::new("Edit Post"),
        data: &post,
        current_route: format!("/edit-post/{}", id),
        user_id: Some(identity.user_id),
    };

    render(
        &state,
        StatusCode::OK,
        View::new("admin/edit-post", Layout::Admin, context)?,
    )
}

/// PUT /edit-post/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let id = parse_post_id(&path.into_inner())?;
    let post = state.posts.update(id, draft_from(form.into_inner())?).await?;

    tracing::info!(post_id = %post.id, user_id = %identity.user_id, "Post updated");

    Ok(redirect(format!("/edit-post/{}", post.id)))
}

/// DELETE /delete-post/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_post_id(&path.into_inner())?;
    state.posts.delete(id).await?;

    tracing::info!(post_id = %id, user_id = %identity.user_id, "Post deleted");

    Ok(redirect("/dashboard"))
}
