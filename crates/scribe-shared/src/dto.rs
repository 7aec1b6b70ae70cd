//! Data Transfer Objects - form bodies and query strings.

use serde::{Deserialize, Serialize};

/// Login and registration form (`application/x-www-form-urlencoded`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

/// Create/edit post form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub body: String,
}

/// Search form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchForm {
    #[serde(rename = "searchTerm", default)]
    pub search_term: String,
}

/// `?page=` query string. Kept raw so bad input falls back to page one
/// instead of failing extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// `?_method=` query string used by HTML forms to reach PUT/DELETE routes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MethodOverrideQuery {
    #[serde(rename = "_method")]
    pub method: Option<String>,
}
