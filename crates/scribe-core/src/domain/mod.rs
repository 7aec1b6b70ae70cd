//! Domain entities - the core business objects.

mod user;

mod post;

pub use post::{Post, PostDraft};
pub use user::User;
