//! HTTP adapter: thin translators between request bodies and the session
//! service. No lifecycle logic lives here.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    dto::auth::{
        IntrospectRequest, IntrospectResponse, LoginRequest, LoginResponse, LogoutRequest,
        LogoutResponse, RefreshRequest, RefreshResponse, SignUpRequest, SignUpResponse,
    },
    errors::AppError,
    state::AppState,
};

pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignUpRequest>,
) -> Result<Json<SignUpResponse>, AppError> {
    let id = state.service.register(&req.email, &req.password).await?;
    Ok(Json(SignUpResponse { id }))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let pair = state
        .service
        .authenticate(&req.email, &req.password)
        .await?;
    Ok(Json(LoginResponse {
        access: pair.access,
        refresh: pair.refresh,
    }))
}

pub async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, AppError> {
    let access = state.service.renew(&req.token).await?;
    Ok(Json(RefreshResponse { access }))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LogoutRequest>,
) -> Result<Json<LogoutResponse>, AppError> {
    state.service.revoke(&req.token).await?;
    Ok(Json(LogoutResponse {
        status: "ok".to_string(),
    }))
}

pub async fn introspect(
    State(state): State<Arc<AppState>>,
    Json(req): Json<IntrospectRequest>,
) -> Result<Json<IntrospectResponse>, AppError> {
    match state.service.authorize(req.token.trim()).await {
        Ok(user_id) => Ok(Json(IntrospectResponse {
            active: true,
            user_id: Some(user_id),
        })),
        Err(AppError::InvalidToken) => Ok(Json(IntrospectResponse {
            active: false,
            user_id: None,
        })),
        Err(e) => Err(e),
    }
}
