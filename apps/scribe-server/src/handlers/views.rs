//! View contexts - the data each template receives.

use serde::Serialize;
use uuid::Uuid;

use scribe_core::domain::Post;
use scribe_core::pagination::{Page, PageNumber};

const DESCRIPTION: &str = "A simple blog built with Rust, Actix and PostgreSQL.";

/// Page title and meta description.
#[derive(Debug, Serialize)]
pub struct Locals {
    pub title: &'static str,
    pub description: &'static str,
}

impl Locals {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            description: DESCRIPTION,
        }
    }
}

/// Paginated post listing (`index`).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingContext<'a> {
    pub locals: Locals,
    pub data: &'a [Post],
    pub current: PageNumber,
    pub next_page: Option<u64>,
    pub prev_page: Option<u64>,
    pub total_count: u64,
    pub current_route: &'static str,
    pub url_ext: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

impl<'a> ListingContext<'a> {
    pub fn new(
        page: &'a Page<Post>,
        current_route: &'static str,
        url_ext: &'static str,
        user_id: Option<Uuid>,
    ) -> Self {
        Self {
            locals: Locals::new("Scribe"),
            data: &page.items,
            current: page.page,
            next_page: page.next_page,
            prev_page: page.prev_page,
            total_count: page.total_count,
            current_route,
            url_ext,
            user_id,
        }
    }
}

/// A single post (`post`, `admin/edit-post`).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostContext<'a> {
    pub locals: Locals,
    pub data: &'a Post,
    pub current_route: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

/// Several posts without paging (`search`, `admin/dashboard`).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsContext<'a> {
    pub locals: Locals,
    pub data: &'a [Post],
    pub current_route: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

/// Forms and static pages: login, register, add-post, about, contact.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormContext<'a> {
    pub locals: Locals,
    pub current_route: &'static str,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

impl<'a> FormContext<'a> {
    pub fn new(title: &'static str, current_route: &'static str, message: &'a str) -> Self {
        Self {
            locals: Locals::new(title),
            current_route,
            message,
            user_id: None,
        }
    }

    pub fn for_user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }
}
