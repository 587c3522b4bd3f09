//! Auth handlers — signup, login, register, refresh, logout.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use validator::Validate;

use credhub_core::error::AppError;
use credhub_entity::user::ProfileDetails;

use crate::dto::request::{LoginRequest, RefreshRequest, RegisterRequest, SignupRequest};
use crate::dto::response::{ApiResponse, MessageResponse, SessionResponse, SignupResponse};
use crate::error::ApiError;
use crate::extractors::bearer_token;
use crate::state::AppState;

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SignupResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    if req.password.len() < state.config.auth.password_min_length {
        return Err(AppError::validation(format!(
            "Password must be at least {} characters",
            state.config.auth.password_min_length
        ))
        .into());
    }

    let id = state
        .directory
        .create_user(&req.username, req.email.as_deref(), &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(SignupResponse { id })),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let identity = state
        .directory
        .verify_password(&req.username, &req.password)
        .await?;

    let session = state.issuer.issue(&identity).await?;

    Ok(Json(ApiResponse::ok(session.into())))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SessionResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let access_token = bearer_token(&headers)?;
    let details = ProfileDetails {
        display_name: req.display_name,
        email: req.email,
    };

    let session = state
        .registration
        .complete(access_token, &req.registration_token, &details)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(session.into()))))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let access_token = bearer_token(&headers)?;
    let session = state
        .renewal
        .rotate(access_token, &req.renewal_token)
        .await?;

    Ok(Json(ApiResponse::ok(session.into())))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let access_token = bearer_token(&headers)?;
    state.revocation.logout(access_token).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Logged out successfully".to_string(),
    })))
}
