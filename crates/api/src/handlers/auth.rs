//! Handlers for the `/auth` resource (register, login, refresh, logout,
//! password reset).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use fiszki_core::error::CoreError;
use fiszki_core::types::DbId;
use fiszki_core::validation::{validate_email, validate_password};
use fiszki_db::models::session::CreateSession;
use fiszki_db::models::user::UserResponse;
use fiszki_db::repositories::{PasswordResetRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_opaque_token, hash_opaque_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Fixed response body for `POST /auth/reset-password`, returned whether or
/// not the account exists so the endpoint cannot be used to enumerate emails.
pub const RESET_PASSWORD_MESSAGE: &str =
    "Jeśli konto istnieje, wyślemy link do zresetowania hasła.";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request body for `POST /auth/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
}

/// Request body for `POST /auth/reset-password/confirm`.
#[derive(Debug, Deserialize)]
pub struct ConfirmResetRequest {
    pub token: String,
    pub password: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Fixed-message response used by the reset endpoint.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account with email + password. Duplicate email maps to 409 via
/// the `uq_users_email` constraint.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let email = validate_email(&input.email).map_err(AppError::Core)?;
    validate_password(&input.password).map_err(AppError::Core)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(&state.pool, &email, &password_hash).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = input.email.trim().to_lowercase();

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    let response = create_auth_response(&state, user).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_opaque_token(&input.refresh_token);

    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // Token rotation: the presented token is single-use.
    SessionRepo::revoke(&state.pool, session.id).await?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let response = create_auth_response(&state, user).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/reset-password
///
/// Always answers 200 with the same message; whether a reset email actually
/// goes out depends on the account existing. A delivery failure is logged,
/// not surfaced, for the same anti-enumeration reason.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let email = validate_email(&input.email).map_err(AppError::Core)?;

    if let Some(user) = UserRepo::find_by_email(&state.pool, &email).await? {
        let (plaintext, token_hash) = generate_opaque_token();
        let expires_at =
            Utc::now() + chrono::Duration::minutes(state.config.jwt.reset_token_expiry_mins);

        PasswordResetRepo::create(&state.pool, user.id, &token_hash, expires_at).await?;

        if let Err(e) = state.mailer.send_password_reset(&email, &plaintext).await {
            tracing::error!(user_id = user.id, error = %e, "Failed to send reset email");
        }
    }

    Ok(Json(MessageResponse {
        message: RESET_PASSWORD_MESSAGE,
    }))
}

/// POST /api/v1/auth/reset-password/confirm
///
/// Consume a reset token and set a new password. All sessions are revoked.
pub async fn confirm_reset(
    State(state): State<AppState>,
    Json(input): Json<ConfirmResetRequest>,
) -> AppResult<StatusCode> {
    validate_password(&input.password).map_err(AppError::Core)?;

    let token_hash = hash_opaque_token(&input.token);
    let token = PasswordResetRepo::find_valid(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired reset token".into(),
            ))
        })?;

    let consumed = PasswordResetRepo::mark_used(&state.pool, token.id).await?;
    if !consumed {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid or expired reset token".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password_hash(&state.pool, token.user_id, &password_hash).await?;
    SessionRepo::revoke_all_for_user(&state.pool, token.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(
    state: &AppState,
    user: fiszki_db::models::user::User,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_opaque_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let session_input = CreateSession {
        user_id: user.id,
        refresh_token_hash: refresh_hash,
        expires_at,
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: user.into(),
    })
}

/// Shared 404 constructor for ownership-scoped lookups.
pub(crate) fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}
