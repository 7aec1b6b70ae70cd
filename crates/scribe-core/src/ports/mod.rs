//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;
mod view;

pub use auth::{
    AuthError, CredentialFailure, PasswordService, SessionClaims, SessionDenylist, SessionTokens,
};
pub use repository::{PostRepository, UserRepository};
pub use view::{Layout, RenderError, Rendered, View, ViewRenderer};
