//! Repository for the `decks` table.

use fiszki_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use fiszki_core::types::DbId;
use sqlx::PgPool;

use crate::models::deck::{CreateDeck, Deck, DeckListFilter, DeckWithCount, UpdateDeck};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, domain_id, name, description, created_at, updated_at";

/// Provides CRUD operations for decks.
pub struct DeckRepo;

impl DeckRepo {
    /// Insert a new deck, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateDeck,
    ) -> Result<Deck, sqlx::Error> {
        let query = format!(
            "INSERT INTO decks (user_id, domain_id, name, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Deck>(&query)
            .bind(user_id)
            .bind(input.domain_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a deck by id, scoped to its owner.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Deck>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM decks WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Deck>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's decks with filtering, sorting, and pagination.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        filter: &DeckListFilter,
    ) -> Result<Vec<Deck>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM decks
             WHERE user_id = $1
               AND ($2::bigint IS NULL OR domain_id = $2)
               AND ($3::text IS NULL OR name ILIKE '%' || $3 || '%')
             ORDER BY {} {}
             LIMIT $4 OFFSET $5",
            filter.sort.column(),
            if filter.descending { "DESC" } else { "ASC" },
        );
        sqlx::query_as::<_, Deck>(&query)
            .bind(user_id)
            .bind(filter.domain_id)
            .bind(&filter.q)
            .bind(clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT))
            .bind(clamp_offset(filter.offset))
            .fetch_all(pool)
            .await
    }

    /// Same as [`DeckRepo::list`], with a per-deck flashcard count attached.
    pub async fn list_with_counts(
        pool: &PgPool,
        user_id: DbId,
        filter: &DeckListFilter,
    ) -> Result<Vec<DeckWithCount>, sqlx::Error> {
        let query = format!(
            "SELECT d.{}, COUNT(f.id) AS flashcard_count
             FROM decks d
             LEFT JOIN flashcards f ON f.deck_id = d.id
             WHERE d.user_id = $1
               AND ($2::bigint IS NULL OR d.domain_id = $2)
               AND ($3::text IS NULL OR d.name ILIKE '%' || $3 || '%')
             GROUP BY d.id
             ORDER BY d.{} {}
             LIMIT $4 OFFSET $5",
            COLUMNS.replace(", ", ", d."),
            filter.sort.column(),
            if filter.descending { "DESC" } else { "ASC" },
        );
        sqlx::query_as::<_, DeckWithCount>(&query)
            .bind(user_id)
            .bind(filter.domain_id)
            .bind(&filter.q)
            .bind(clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT))
            .bind(clamp_offset(filter.offset))
            .fetch_all(pool)
            .await
    }

    /// Update a deck. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the deck does not exist or belongs to another user.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateDeck,
    ) -> Result<Option<Deck>, sqlx::Error> {
        let query = format!(
            "UPDATE decks SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                domain_id = COALESCE($5, domain_id),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Deck>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.domain_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a deck (cards cascade). Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM decks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
