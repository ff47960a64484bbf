//! Route definitions for authentication and password reset.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /register                -> register
/// POST /login                   -> login
/// POST /refresh                 -> refresh
/// POST /logout                  -> logout (requires auth)
/// POST /reset-password          -> reset_password (always 200)
/// POST /reset-password/confirm  -> confirm_reset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/reset-password", post(auth::reset_password))
        .route("/reset-password/confirm", post(auth::confirm_reset))
}
