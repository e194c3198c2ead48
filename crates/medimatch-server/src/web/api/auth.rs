use crate::auth::{
    create_access_token, generate_reset_token, hash_password, hash_reset_token, verify_password,
};
use crate::error::ApiError;
use crate::state::AppState;
use crate::web::api::middleware::{AuthUser, ValidatedJson};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{Duration, Utc};
use medimatch_common::validation::{
    validate_current_password, validate_email_field, validate_login_password,
    validate_new_password, validate_password, validate_reset_token, validate_username,
};
use medimatch_common::{ApiResponse, FieldError, User};
use medimatch_db::{UserRepo, UserRow};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(custom(function = validate_username))]
    pub username: String,
    #[serde(default)]
    #[validate(custom(function = validate_email_field))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = validate_password))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(custom(function = validate_email_field))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = validate_login_password))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUsernameRequest {
    #[serde(default)]
    #[validate(custom(function = validate_username))]
    pub username: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    #[validate(custom(function = validate_current_password))]
    pub current_password: String,
    #[serde(default)]
    #[validate(custom(function = validate_new_password))]
    pub new_password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    #[validate(custom(function = validate_email_field))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    #[validate(custom(function = validate_reset_token))]
    pub token: String,
    #[serde(default)]
    #[validate(custom(function = validate_password))]
    pub password: String,
}

fn user_payload(user: UserRow, token: &str) -> serde_json::Value {
    json!({
        "user": User::from(user),
        "token": token,
    })
}

/// Fetch the authenticated user's row, rejecting tokens whose subject no
/// longer exists.
async fn current_user(state: &AppState, auth: &AuthUser) -> Result<UserRow, ApiError> {
    let user_id = auth.user_id()?;
    UserRepo::get_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Token is valid but user no longer exists."))
}

/// POST /api/auth/register
#[tracing::instrument(skip(state, req))]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let existing =
        UserRepo::get_by_email_or_username(&state.pool, &req.email, &req.username).await?;
    if existing.is_some() {
        return Err(ApiError::conflict(
            "User with this email or username already exists",
        ));
    }

    let password_hash = hash_password(&req.password)?;
    let user = UserRepo::create(
        &state.pool,
        Uuid::new_v4(),
        &req.username,
        &req.email,
        &password_hash,
    )
    .await?;

    let token = create_access_token(&user.user_id.to_string(), &user.email, &state.config.auth)?;

    tracing::info!(username = %user.username, "registered new user");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            "User registered successfully",
            user_payload(user, &token),
        )),
    ))
}

/// POST /api/auth/login
#[tracing::instrument(skip(state, req))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Same response whether the email is unknown or the password is wrong
    let user = UserRepo::get_by_email(&state.pool, &req.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    if !verify_password(&req.password, &user.password_hash)? {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let token = create_access_token(&user.user_id.to_string(), &user.email, &state.config.auth)?;

    Ok(Json(ApiResponse::ok(
        "Login successful",
        user_payload(user, &token),
    )))
}

/// GET /api/auth/me
#[tracing::instrument(skip(state))]
pub async fn me(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let user = current_user(&state, &auth).await?;
    Ok(Json(ApiResponse::ok(
        "User profile fetched successfully",
        json!({ "user": User::from(user) }),
    )))
}

/// PATCH /api/auth/update-username
#[tracing::instrument(skip(state, req))]
pub async fn update_username(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateUsernameRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = auth.user_id()?;

    if UserRepo::username_taken_by_other(&state.pool, &req.username, user_id).await? {
        return Err(ApiError::conflict("Username is already taken"));
    }

    let user = UserRepo::update_username(&state.pool, user_id, &req.username)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Token is valid but user no longer exists."))?;

    Ok(Json(ApiResponse::ok(
        "Username updated successfully",
        json!({ "user": User::from(user) }),
    )))
}

/// PATCH /api/auth/change-password
#[tracing::instrument(skip(state, req))]
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.new_password == req.current_password {
        return Err(ApiError::Validation(vec![FieldError::new(
            "newPassword",
            "New password must be different from current password",
        )]));
    }

    let user = current_user(&state, &auth).await?;

    if !verify_password(&req.current_password, &user.password_hash)? {
        return Err(ApiError::unauthorized("Current password is incorrect"));
    }

    let password_hash = hash_password(&req.new_password)?;
    UserRepo::update_password(&state.pool, user.user_id, &password_hash).await?;

    state.mailer.send_password_changed(&user.email, &user.username)?;

    Ok(Json(ApiResponse::message("Password changed successfully")))
}

/// POST /api/auth/forgot-password
#[tracing::instrument(skip(state, req))]
pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Uniform response whether or not the account exists
    let uniform = || {
        Json(ApiResponse::message(
            "If the email exists, a password reset link has been sent",
        ))
    };

    let user = match UserRepo::get_by_email(&state.pool, &req.email).await? {
        Some(user) => user,
        None => return Ok(uniform()),
    };

    let (raw_token, token_hash) = generate_reset_token();
    let expires_at = Utc::now() + Duration::minutes(state.config.auth.reset_token_ttl_minutes);
    UserRepo::set_reset_token(&state.pool, user.user_id, &token_hash, expires_at).await?;

    if let Err(e) = state
        .mailer
        .send_password_reset(&user.email, &user.username, &raw_token)
    {
        // Roll back the issued token so a half-delivered reset cannot linger
        UserRepo::clear_reset_token(&state.pool, user.user_id).await?;
        return Err(ApiError::Internal(e.context("Email could not be sent")));
    }

    Ok(uniform())
}

/// POST /api/auth/reset-password
#[tracing::instrument(skip(state, req))]
pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let token_hash = hash_reset_token(&req.token);

    let user = UserRepo::get_by_valid_reset_token(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| ApiError::bad_request("Invalid or expired reset token"))?;

    let password_hash = hash_password(&req.password)?;
    // Also clears the reset token: single-use
    UserRepo::update_password(&state.pool, user.user_id, &password_hash).await?;

    state.mailer.send_password_changed(&user.email, &user.username)?;

    Ok(Json(ApiResponse::message("Password reset successfully")))
}
