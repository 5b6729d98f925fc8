//! API 模块
//!
//! 提供 REST API 支持。

pub mod app_state;
pub mod dto;
pub mod handlers;
pub mod routes;

use crate::api::app_state::AppState;
use crate::observability::{create_observability_router, metrics_middleware};
use crate::security::middleware::{auth_middleware, security_headers_middleware};
use axum::{Router, extract::DefaultBodyLimit, middleware};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn create_router(app_state: AppState) -> Router {
    // Chat and report routes require a login token
    let protected = Router::new()
        .merge(routes::chat_routes::create_chat_router())
        .merge(routes::report_routes::create_report_router())
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let api = Router::new()
        .merge(routes::auth_routes::create_auth_router())
        .merge(protected);

    let metrics = app_state.observability.metrics.clone();
    let observability = create_observability_router(app_state.observability.clone());

    Router::new()
        .nest("/api/v1", api)
        .layer(DefaultBodyLimit::max(app_state.config.server.max_upload_bytes))
        .with_state(app_state)
        .merge(observability)
        .layer(middleware::from_fn_with_state(metrics, metrics_middleware))
        // Add security headers middleware to all routes
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
