//! Flashcard entity model and DTOs.

use fiszki_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Where a flashcard came from: hand-written or accepted from a generation.
pub const SOURCE_MANUAL: &str = "manual";
pub const SOURCE_AI: &str = "ai";

/// A flashcard row from the `flashcards` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Flashcard {
    pub id: DbId,
    pub deck_id: DbId,
    pub front: String,
    pub back: String,
    pub source: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new flashcard.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFlashcard {
    pub front: String,
    pub back: String,
}

/// DTO for updating an existing flashcard. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFlashcard {
    pub front: Option<String>,
    pub back: Option<String>,
}
