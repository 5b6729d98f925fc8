//! Security Middleware Module
//!
//! Axum middleware for token authentication and security headers.

use axum::{
    extract::{Request, State},
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::api::app_state::AppState;
use crate::error::AppError;
use crate::security::auth::Credentials;

/// Authentication middleware
///
/// Resolves the request token to a session and stores it in the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let credentials = Credentials::from_headers(req.headers());
    let token = credentials.require_token()?;
    let session = state.account_service.verify(token).await?;

    tracing::debug!(username = %session.username, "request authenticated");
    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}

const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("x-xss-protection", "1; mode=block"),
    ("strict-transport-security", "max-age=31536000; includeSubDomains"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    ("permissions-policy", "geolocation=(), microphone=(), camera=()"),
];

/// Security headers middleware
pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    for &(name, value) in SECURITY_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    response
}
