//! Generation request and candidate models.

use fiszki_core::status::GenerationStatus;
use fiszki_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `generation_requests` table.
///
/// `status` is decoded through [`GenerationStatus`]; a row holding an
/// unknown status string fails to decode instead of being misread.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GenerationRequest {
    pub id: DbId,
    pub user_id: DbId,
    pub deck_id: Option<DbId>,
    pub source_text: String,
    #[sqlx(try_from = "String")]
    pub status: GenerationStatus,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A candidate card produced by the worker, awaiting acceptance.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GenerationCandidate {
    pub id: DbId,
    pub request_id: DbId,
    pub front: String,
    pub back: String,
    pub accepted: bool,
    pub created_at: Timestamp,
}

/// A request together with its candidates, as returned by the detail
/// endpoint. Candidates are empty until the worker has produced them.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequestDetail {
    #[serde(flatten)]
    pub request: GenerationRequest,
    pub candidates: Vec<GenerationCandidate>,
}

/// DTO for creating a new generation request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGenerationRequest {
    pub source_text: String,
    pub deck_id: Option<DbId>,
}

/// DTO for accepting candidates into a deck.
#[derive(Debug, Clone, Deserialize)]
pub struct AcceptCandidates {
    pub deck_id: DbId,
    pub candidate_ids: Vec<DbId>,
}

/// A generated front/back pair the worker writes as a candidate row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateCard {
    pub front: String,
    pub back: String,
}
