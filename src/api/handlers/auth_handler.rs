use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::auth_dto::*},
    error::AppError,
};

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Registering user: {}", request.username);

    state
        .account_service
        .register(&request.username, &request.password)
        .await?;

    let response = RegisterResponse {
        message: "User registered successfully".to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Login attempt: {}", request.username);

    let session = state
        .account_service
        .login(&request.username, &request.password)
        .await?;

    let response = LoginResponse {
        message: "Login successful".to_string(),
        token: session.id,
    };
    Ok(Json(response))
}
