//! Authentication implementations.

mod denylist;
mod jwt;
mod password;

pub use denylist::InMemorySessionDenylist;
pub use jwt::{JwtConfig, JwtSessionTokens};
pub use password::Argon2PasswordService;
