//! # Scribe Core
//!
//! The domain layer of the Scribe blog.
//! Posts, users, the ports the infrastructure implements, and the little
//! logic that is not plain plumbing: pagination, search sanitizing and the
//! account flows (registration and login).

pub mod accounts;
pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod search;

pub use accounts::{AccountError, AccountService};
pub use error::{ConflictError, RepoError};
