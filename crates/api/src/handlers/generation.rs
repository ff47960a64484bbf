//! Handlers for AI generation requests.
//!
//! Creation is rate limited per user; the worker picks requests up
//! asynchronously, so the create endpoint returns the `pending` row and
//! clients poll the detail endpoint until the status is terminal.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use fiszki_core::error::CoreError;
use fiszki_core::status::GenerationStatus;
use fiszki_core::types::DbId;
use fiszki_core::validation::validate_source_text;
use fiszki_db::models::flashcard::Flashcard;
use fiszki_db::models::generation::{
    AcceptCandidates, CreateGenerationRequest, GenerationRequest, GenerationRequestDetail,
};
use fiszki_db::repositories::{DeckRepo, GenerationRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::auth::not_found;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::state::AppState;

/// POST /api/v1/generation-requests
///
/// Returns 429 with code `RATE_LIMIT` when the user has exhausted their
/// request budget; clients key retry messaging off that code.
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateGenerationRequest>,
) -> AppResult<(StatusCode, Json<GenerationRequest>)> {
    if !state.rate_limiter.check(auth_user.user_id).await {
        tracing::warn!(user_id = auth_user.user_id, "Generation rate limit hit");
        return Err(AppError::Core(CoreError::RateLimited(
            "Too many generation requests, try again later".to_string(),
        )));
    }

    validate_source_text(&input.source_text).map_err(AppError::Core)?;

    if let Some(deck_id) = input.deck_id {
        DeckRepo::find_by_id(&state.pool, auth_user.user_id, deck_id)
            .await?
            .ok_or_else(|| not_found("Deck", deck_id))?;
    }

    let request =
        GenerationRepo::create(&state.pool, auth_user.user_id, &input.source_text, input.deck_id)
            .await?;
    tracing::info!(request_id = request.id, "Created generation request");
    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /api/v1/generation-requests
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<GenerationRequest>>> {
    let requests =
        GenerationRepo::list_for_user(&state.pool, auth_user.user_id, params.limit, params.offset)
            .await?;
    Ok(Json(requests))
}

/// GET /api/v1/generation-requests/{id}
///
/// The polling endpoint: returns the request with all candidates produced
/// so far.
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<GenerationRequestDetail>> {
    let request = GenerationRepo::find_by_id(&state.pool, auth_user.user_id, id)
        .await?
        .ok_or_else(|| not_found("GenerationRequest", id))?;
    let candidates = GenerationRepo::candidates_for_request(&state.pool, id).await?;
    Ok(Json(GenerationRequestDetail {
        request,
        candidates,
    }))
}

/// POST /api/v1/generation-requests/{id}/accept
///
/// Copies the chosen candidates into a deck as `source = ai` flashcards.
/// Only allowed once the request is `completed`; already accepted or unknown
/// candidate ids are a conflict.
pub async fn accept(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AcceptCandidates>,
) -> AppResult<(StatusCode, Json<Vec<Flashcard>>)> {
    let request = GenerationRepo::find_by_id(&state.pool, auth_user.user_id, id)
        .await?
        .ok_or_else(|| not_found("GenerationRequest", id))?;

    if request.status != GenerationStatus::Completed {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Generation request is {}, candidates can only be accepted once it is completed",
            request.status
        ))));
    }

    if input.candidate_ids.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "candidate_ids must not be empty".to_string(),
        )));
    }

    DeckRepo::find_by_id(&state.pool, auth_user.user_id, input.deck_id)
        .await?
        .ok_or_else(|| not_found("Deck", input.deck_id))?;

    let candidates =
        GenerationRepo::find_unaccepted_candidates(&state.pool, id, &input.candidate_ids).await?;
    if candidates.len() != input.candidate_ids.len() {
        return Err(AppError::Core(CoreError::Conflict(
            "One or more candidates are unknown or already accepted".to_string(),
        )));
    }

    let cards = GenerationRepo::accept_into_deck(&state.pool, input.deck_id, &candidates).await?;
    tracing::info!(
        request_id = id,
        deck_id = input.deck_id,
        count = cards.len(),
        "Accepted generation candidates"
    );
    Ok((StatusCode::CREATED, Json(cards)))
}
