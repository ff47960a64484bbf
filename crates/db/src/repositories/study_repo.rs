//! Repository for study sessions and review events.

use fiszki_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use fiszki_core::types::DbId;
use sqlx::PgPool;

use crate::models::study::{ReviewEvent, SessionReviewCounts, StudySession};

const SESSION_COLUMNS: &str = "id, user_id, deck_id, started_at, completed_at";

const EVENT_COLUMNS: &str = "id, session_id, flashcard_id, rating, reviewed_at";

/// Provides operations for study sessions and their review events.
pub struct StudyRepo;

impl StudyRepo {
    /// Start a new session on a deck the user owns.
    ///
    /// Returns `None` when the deck does not exist or is not theirs.
    pub async fn create_session(
        pool: &PgPool,
        user_id: DbId,
        deck_id: DbId,
    ) -> Result<Option<StudySession>, sqlx::Error> {
        sqlx::query_as::<_, StudySession>(
            "INSERT INTO study_sessions (user_id, deck_id)
             SELECT $1, d.id FROM decks d
             WHERE d.id = $2 AND d.user_id = $1
             RETURNING id, user_id, deck_id, started_at, completed_at",
        )
        .bind(user_id)
        .bind(deck_id)
        .fetch_optional(pool)
        .await
    }

    /// Find a session by id, scoped to its owner.
    pub async fn find_session(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<StudySession>, sqlx::Error> {
        let query =
            format!("SELECT {SESSION_COLUMNS} FROM study_sessions WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, StudySession>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's sessions, most recent first.
    pub async fn list_sessions(
        pool: &PgPool,
        user_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<StudySession>, sqlx::Error> {
        let query = format!(
            "SELECT {SESSION_COLUMNS} FROM study_sessions
             WHERE user_id = $1
             ORDER BY started_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, StudySession>(&query)
            .bind(user_id)
            .bind(clamp_limit(limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }

    /// Complete an open session. Returns the updated row, or `None` when the
    /// session is missing, foreign, or already completed.
    pub async fn complete_session(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<StudySession>, sqlx::Error> {
        let query = format!(
            "UPDATE study_sessions SET completed_at = NOW()
             WHERE id = $1 AND user_id = $2 AND completed_at IS NULL
             RETURNING {SESSION_COLUMNS}"
        );
        sqlx::query_as::<_, StudySession>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Append one review event to a session.
    pub async fn record_review(
        pool: &PgPool,
        session_id: DbId,
        flashcard_id: DbId,
        rating: i16,
    ) -> Result<ReviewEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO review_events (session_id, flashcard_id, rating)
             VALUES ($1, $2, $3)
             RETURNING {EVENT_COLUMNS}"
        );
        sqlx::query_as::<_, ReviewEvent>(&query)
            .bind(session_id)
            .bind(flashcard_id)
            .bind(rating)
            .fetch_one(pool)
            .await
    }

    /// Aggregate review counts for a session.
    pub async fn review_counts(
        pool: &PgPool,
        session_id: DbId,
    ) -> Result<SessionReviewCounts, sqlx::Error> {
        sqlx::query_as::<_, SessionReviewCounts>(
            "SELECT
                 COUNT(*)                              AS total_reviews,
                 COUNT(DISTINCT flashcard_id)          AS distinct_flashcards,
                 COUNT(*) FILTER (WHERE rating = 0)    AS blackout_count,
                 COUNT(*) FILTER (WHERE rating = 1)    AS hard_count,
                 COUNT(*) FILTER (WHERE rating = 2)    AS good_count,
                 COUNT(*) FILTER (WHERE rating = 3)    AS easy_count
             FROM review_events
             WHERE session_id = $1",
        )
        .bind(session_id)
        .fetch_one(pool)
        .await
    }
}
