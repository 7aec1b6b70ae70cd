//! # Scribe Shared
//!
//! Wire types shared by the server and any client: form bodies, query
//! strings and error documents.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
