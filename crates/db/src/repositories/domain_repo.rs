//! Repository for the `domains` table.

use fiszki_core::types::DbId;
use sqlx::PgPool;

use crate::models::domain::Domain;

const COLUMNS: &str = "id, user_id, name, created_at";

/// Provides operations for user domains.
pub struct DomainRepo;

impl DomainRepo {
    /// Insert a domain for `(user_id, name)` or return the existing row.
    ///
    /// Returns `(domain, created)` where `created` is `false` when the name
    /// already existed for this user. The `ON CONFLICT DO NOTHING` +
    /// follow-up select keeps the operation race-safe against concurrent
    /// creates: the loser of the race simply reads the winner's row.
    pub async fn create_idempotent(
        pool: &PgPool,
        user_id: DbId,
        name: &str,
    ) -> Result<(Domain, bool), sqlx::Error> {
        let insert = format!(
            "INSERT INTO domains (user_id, name)
             VALUES ($1, $2)
             ON CONFLICT (user_id, name) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Domain>(&insert)
            .bind(user_id)
            .bind(name)
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(domain) => Ok((domain, true)),
            None => {
                let select =
                    format!("SELECT {COLUMNS} FROM domains WHERE user_id = $1 AND name = $2");
                let existing = sqlx::query_as::<_, Domain>(&select)
                    .bind(user_id)
                    .bind(name)
                    .fetch_one(pool)
                    .await?;
                Ok((existing, false))
            }
        }
    }

    /// List all domains for a user, most recently created first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Domain>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM domains WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Domain>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a domain by id, scoped to its owner.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Domain>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM domains WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Domain>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
