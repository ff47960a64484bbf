//! Wire types mirroring the API's JSON payloads.
//!
//! These deserialize exactly what the server serializes; the client never
//! sees server-internal fields like password hashes.

use fiszki_core::status::GenerationStatus;
use serde::{Deserialize, Serialize};

pub use fiszki_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub id: DbId,
    pub email: String,
    pub created_at: Timestamp,
}

/// Tokens and user info returned by login and refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

// ---------------------------------------------------------------------------
// Domains, decks, flashcards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Domain {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Deck {
    pub id: DbId,
    pub user_id: DbId,
    pub domain_id: Option<DbId>,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Present only when the list was requested with `include_counts=true`.
    #[serde(default)]
    pub flashcard_count: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Flashcard {
    pub id: DbId,
    pub deck_id: DbId,
    pub front: String,
    pub back: String,
    pub source: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body for deck creation and patching; `None` fields are omitted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeckPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<DbId>,
}

/// Body for flashcard creation and patching; `None` fields are omitted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FlashcardPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back: Option<String>,
}

/// Query arguments for deck listing; `None` fields are omitted from the URL.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeckListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_counts: Option<bool>,
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    pub id: DbId,
    pub user_id: DbId,
    pub deck_id: Option<DbId>,
    pub source_text: String,
    pub status: GenerationStatus,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationCandidate {
    pub id: DbId,
    pub request_id: DbId,
    pub front: String,
    pub back: String,
    pub accepted: bool,
    pub created_at: Timestamp,
}

/// The polling payload: request fields flattened alongside its candidates.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequestDetail {
    #[serde(flatten)]
    pub request: GenerationRequest,
    pub candidates: Vec<GenerationCandidate>,
}

impl GenerationRequestDetail {
    /// Whether the underlying request has reached a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.request.status.is_terminal()
    }
}

// ---------------------------------------------------------------------------
// Study
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct StudySession {
    pub id: DbId,
    pub user_id: DbId,
    pub deck_id: DbId,
    pub started_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewEvent {
    pub id: DbId,
    pub session_id: DbId,
    pub flashcard_id: DbId,
    pub rating: i16,
    pub reviewed_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSummary {
    pub session_id: DbId,
    pub deck_id: DbId,
    pub started_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub duration_secs: Option<i64>,
    pub total_reviews: i64,
    pub distinct_flashcards: i64,
    pub blackout_count: i64,
    pub hard_count: i64,
    pub good_count: i64,
    pub easy_count: i64,
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub db_healthy: bool,
}
