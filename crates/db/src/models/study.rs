//! Study session, review event, and summary models.

use fiszki_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A study session row from the `study_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudySession {
    pub id: DbId,
    pub user_id: DbId,
    pub deck_id: DbId,
    pub started_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

/// An append-only review event row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewEvent {
    pub id: DbId,
    pub session_id: DbId,
    pub flashcard_id: DbId,
    pub rating: i16,
    pub reviewed_at: Timestamp,
}

/// DTO for creating a new study session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudySession {
    pub deck_id: DbId,
}

/// DTO for recording one review outcome.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReviewEvent {
    pub flashcard_id: DbId,
    /// 0 = blackout, 1 = hard, 2 = good, 3 = easy.
    pub rating: i16,
}

/// Aggregated review counts for a session.
///
/// Pure bookkeeping: no scheduling decision is derived from these numbers.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SessionReviewCounts {
    pub total_reviews: i64,
    pub distinct_flashcards: i64,
    /// Reviews with rating 0.
    pub blackout_count: i64,
    /// Reviews with rating 1.
    pub hard_count: i64,
    /// Reviews with rating 2.
    pub good_count: i64,
    /// Reviews with rating 3.
    pub easy_count: i64,
}

/// Full session summary returned by `GET /study-sessions/{id}/summary`.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: DbId,
    pub deck_id: DbId,
    pub started_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    /// Elapsed seconds between start and completion, when completed.
    pub duration_secs: Option<i64>,
    #[serde(flatten)]
    pub counts: SessionReviewCounts,
}
