//! Password reset token model.

use fiszki_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `password_reset_tokens` table.
///
/// Only the SHA-256 hex digest of the token is stored; the plaintext goes
/// into the reset email and is never persisted.
#[derive(Debug, Clone, FromRow)]
pub struct PasswordResetToken {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub used_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
