use crate::auth::auth_dto::{
    InitiatePasswordResetRequest, LoginRequest, MessageResponse, RegisterRequest,
    ResetPasswordRequest, TokenResponse,
};
use crate::error::{AppError, Result};
use crate::middleware::bearer_token;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

fn auth_header(headers: &HeaderMap) -> Option<&str> {
    headers.get("Authorization").and_then(|h| h.to_str().ok())
}

/// Register a new user; the generated password is mailed, never returned.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered, password sent by email", body = MessageResponse),
        (status = 400, description = "Missing email or user already exists")
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let email = payload
        .email
        .ok_or_else(|| AppError::Validation("Missing email".to_string()))?;

    state.auth_service.register(&email).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered, check your email")),
    ))
}

/// Login with email and password.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    let email = payload
        .email
        .ok_or_else(|| AppError::Validation("Missing email or password".to_string()))?;
    let password = payload
        .password
        .ok_or_else(|| AppError::Validation("Missing email or password".to_string()))?;

    let token = state.auth_service.login(&email, &password).await?;

    Ok(Json(TokenResponse { token }))
}

/// Invalidate the presented session token.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 400, description = "Missing or invalid Authorization header")
    ),
    tag = "auth",
    security(("bearer_auth" = []))
)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>> {
    let token = bearer_token(auth_header(&headers))?;

    state.auth_service.logout(token).await?;

    Ok(Json(MessageResponse::new("Logged out successfully")))
}

/// Exchange a live token for a fresh one; the old token stops working.
#[utoipa::path(
    post,
    path = "/api/refresh-token",
    responses(
        (status = 200, description = "New token issued", body = TokenResponse),
        (status = 400, description = "Missing or invalid Authorization header"),
        (status = 401, description = "Token is invalid or expired")
    ),
    tag = "auth",
    security(("bearer_auth" = []))
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>> {
    let old_token = bearer_token(auth_header(&headers))?;

    let token = state.auth_service.refresh(old_token).await?;

    Ok(Json(TokenResponse { token }))
}

/// Mail a one-time password reset link.
#[utoipa::path(
    post,
    path = "/api/initiate-password-reset",
    request_body = InitiatePasswordResetRequest,
    responses(
        (status = 200, description = "Reset link sent", body = MessageResponse),
        (status = 400, description = "Missing email or unknown user")
    ),
    tag = "auth"
)]
pub async fn initiate_password_reset(
    State(state): State<AppState>,
    Json(payload): Json<InitiatePasswordResetRequest>,
) -> Result<Json<MessageResponse>> {
    let email = payload
        .email
        .ok_or_else(|| AppError::Validation("Missing email".to_string()))?;

    state.auth_service.initiate_password_reset(&email).await?;

    Ok(Json(MessageResponse::new("Password reset link sent to email")))
}

/// Consume a reset token and set the new password.
#[utoipa::path(
    post,
    path = "/api/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset", body = MessageResponse),
        (status = 400, description = "Missing fields or invalid/expired token")
    ),
    tag = "auth"
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>> {
    let token = payload
        .token
        .ok_or_else(|| AppError::Validation("Missing token or new password".to_string()))?;
    let new_password = payload
        .new_password
        .ok_or_else(|| AppError::Validation("Missing token or new password".to_string()))?;

    state
        .auth_service
        .complete_password_reset(&token, &new_password)
        .await?;

    Ok(Json(MessageResponse::new("Password reset successful")))
}
