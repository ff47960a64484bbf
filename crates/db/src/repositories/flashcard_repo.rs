//! Repository for the `flashcards` table.
//!
//! Flashcards are owned through their deck; every query joins `decks` to
//! enforce the ownership scope.

use fiszki_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use fiszki_core::types::DbId;
use sqlx::PgPool;

use crate::models::flashcard::{CreateFlashcard, Flashcard, UpdateFlashcard};

const COLUMNS: &str = "f.id, f.deck_id, f.front, f.back, f.source, f.created_at, f.updated_at";

/// Provides CRUD operations for flashcards.
pub struct FlashcardRepo;

impl FlashcardRepo {
    /// Insert a new flashcard into a deck the user owns.
    ///
    /// Returns `None` when the deck does not exist or is not theirs.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        deck_id: DbId,
        input: &CreateFlashcard,
        source: &str,
    ) -> Result<Option<Flashcard>, sqlx::Error> {
        sqlx::query_as::<_, Flashcard>(
            "INSERT INTO flashcards (deck_id, front, back, source)
             SELECT d.id, $3, $4, $5 FROM decks d
             WHERE d.id = $1 AND d.user_id = $2
             RETURNING id, deck_id, front, back, source, created_at, updated_at",
        )
        .bind(deck_id)
        .bind(user_id)
        .bind(&input.front)
        .bind(&input.back)
        .bind(source)
        .fetch_optional(pool)
        .await
    }

    /// Find a flashcard by id, scoped to the owning user.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Flashcard>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM flashcards f
             JOIN decks d ON d.id = f.deck_id
             WHERE f.id = $1 AND d.user_id = $2"
        );
        sqlx::query_as::<_, Flashcard>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List the flashcards of a deck the user owns, oldest first.
    pub async fn list_for_deck(
        pool: &PgPool,
        user_id: DbId,
        deck_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Flashcard>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM flashcards f
             JOIN decks d ON d.id = f.deck_id
             WHERE f.deck_id = $1 AND d.user_id = $2
             ORDER BY f.created_at ASC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Flashcard>(&query)
            .bind(deck_id)
            .bind(user_id)
            .bind(clamp_limit(limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }

    /// Update a flashcard. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the card does not exist or is not owned by the user.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateFlashcard,
    ) -> Result<Option<Flashcard>, sqlx::Error> {
        sqlx::query_as::<_, Flashcard>(
            "UPDATE flashcards f SET
                front = COALESCE($3, f.front),
                back = COALESCE($4, f.back),
                updated_at = NOW()
             FROM decks d
             WHERE f.id = $1 AND d.id = f.deck_id AND d.user_id = $2
             RETURNING f.id, f.deck_id, f.front, f.back, f.source, f.created_at, f.updated_at",
        )
        .bind(id)
        .bind(user_id)
        .bind(&input.front)
        .bind(&input.back)
        .fetch_optional(pool)
        .await
    }

    /// Delete a flashcard. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM flashcards f
             USING decks d
             WHERE f.id = $1 AND d.id = f.deck_id AND d.user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether a flashcard belongs to the given deck.
    pub async fn belongs_to_deck(
        pool: &PgPool,
        flashcard_id: DbId,
        deck_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM flashcards WHERE id = $1 AND deck_id = $2")
                .bind(flashcard_id)
                .bind(deck_id)
                .fetch_optional(pool)
                .await?;
        Ok(row.is_some())
    }
}
