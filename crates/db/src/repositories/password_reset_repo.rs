//! Repository for the `password_reset_tokens` table.

use fiszki_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::password_reset::PasswordResetToken;

const COLUMNS: &str = "id, user_id, token_hash, expires_at, used_at, created_at";

/// Provides operations for password reset tokens.
pub struct PasswordResetRepo;

impl PasswordResetRepo {
    /// Store a new reset token hash for a user.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<PasswordResetToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO password_reset_tokens (user_id, token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PasswordResetToken>(&query)
            .bind(user_id)
            .bind(token_hash)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a token by hash that is unused and unexpired.
    pub async fn find_valid(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<PasswordResetToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM password_reset_tokens
             WHERE token_hash = $1
               AND used_at IS NULL
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, PasswordResetToken>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Mark a token as used. Returns `true` if the row was updated.
    ///
    /// The `used_at IS NULL` guard makes consumption single-use even under
    /// concurrent confirm attempts.
    pub async fn mark_used(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE password_reset_tokens SET used_at = NOW()
             WHERE id = $1 AND used_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
