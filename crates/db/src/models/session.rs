//! Refresh-token session model.

use fiszki_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A session row from the `user_sessions` table.
///
/// `refresh_token_hash` is the SHA-256 hex digest of the opaque refresh
/// token; the plaintext is never stored.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a new session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
