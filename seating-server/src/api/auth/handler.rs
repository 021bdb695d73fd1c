//! Authentication Handlers

use axum::{Extension, Json, extract::State};
use shared::models::{LoginRequest, LoginResponse, User, UserCreate};

use crate::auth::{CurrentUser, hash_password, verify_password};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::security_log;
use crate::utils::validation::{
    MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, MIN_PASSWORD_LEN, validate_email, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// POST /api/auth/register - create an account
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<User>> {
    validate_required_text(&payload.username, "username", MAX_SHORT_TEXT_LEN)?;
    validate_email(&payload.email)?;
    let password_len = payload.password.chars().count();
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&password_len) {
        return Err(AppError::validation(format!(
            "password must be {MIN_PASSWORD_LEN} to {MAX_PASSWORD_LEN} characters"
        ))
        .with_detail("field", "password"));
    }

    let db = state.get_db();
    if user::find_by_username(db, &payload.username).await?.is_some() {
        return Err(AppError::new(ErrorCode::UsernameExists).with_detail("username", payload.username));
    }
    if user::email_exists(db, &payload.email).await? {
        return Err(AppError::new(ErrorCode::EmailExists).with_detail("email", payload.email));
    }

    let password_hash = hash_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
    let created = user::create(
        db,
        &payload.username,
        &payload.email,
        payload.role,
        &password_hash,
    )
    .await?;

    security_log!(
        "INFO",
        "user_registered",
        user_id = created.id.as_str(),
        role = created.role.as_str()
    );
    Ok(Json(created))
}

/// POST /api/auth/login - exchange credentials for a bearer token
///
/// Unknown user and wrong password return the same error.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let row = user::find_by_username(state.get_db(), &req.username).await?;

    let row = match row {
        Some(row) if verify_password(&req.password, &row.password_hash) => row,
        found => {
            let reason = if found.is_some() {
                "invalid_password"
            } else {
                "user_not_found"
            };
            security_log!(
                "WARN",
                "login_failed",
                username = req.username.as_str(),
                reason = reason
            );
            return Err(AppError::invalid_credentials());
        }
    };

    let user = User::from(row);
    let access_token = state
        .get_jwt_service()
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(user_id = %user.id, username = %user.username, "User logged in");

    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
        user,
    }))
}

/// GET /api/auth/me - the authenticated account
pub async fn me(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<User>> {
    let user = user::find_by_id(state.get_db(), &current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {}", current_user.id)))?;
    Ok(Json(user))
}
