//! Security Module
//!
//! - Token extraction from the `Authorization` header
//! - Authentication and security header middleware

pub mod auth;
pub mod middleware;

pub use auth::Credentials;
pub use middleware::{auth_middleware, security_headers_middleware};
