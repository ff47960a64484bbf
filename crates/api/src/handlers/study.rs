//! Handlers for study sessions and review events.
//!
//! Review events are append-only bookkeeping; nothing here schedules future
//! reviews.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use fiszki_core::error::CoreError;
use fiszki_core::types::DbId;
use fiszki_core::validation::validate_review_rating;
use fiszki_db::models::study::{
    CreateReviewEvent, CreateStudySession, ReviewEvent, SessionSummary, StudySession,
};
use fiszki_db::repositories::{FlashcardRepo, StudyRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::auth::not_found;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::state::AppState;

/// POST /api/v1/study-sessions
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateStudySession>,
) -> AppResult<(StatusCode, Json<StudySession>)> {
    let session = StudyRepo::create_session(&state.pool, auth_user.user_id, input.deck_id)
        .await?
        .ok_or_else(|| not_found("Deck", input.deck_id))?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/v1/study-sessions
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<StudySession>>> {
    let sessions =
        StudyRepo::list_sessions(&state.pool, auth_user.user_id, params.limit, params.offset)
            .await?;
    Ok(Json(sessions))
}

/// GET /api/v1/study-sessions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<StudySession>> {
    let session = StudyRepo::find_session(&state.pool, auth_user.user_id, id)
        .await?
        .ok_or_else(|| not_found("StudySession", id))?;
    Ok(Json(session))
}

/// PATCH /api/v1/study-sessions/{id}/complete
///
/// Completing twice is a conflict, not an idempotent no-op; the second call
/// would otherwise silently discard the original completion time.
pub async fn complete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<StudySession>> {
    match StudyRepo::complete_session(&state.pool, auth_user.user_id, id).await? {
        Some(session) => Ok(Json(session)),
        None => {
            // Disambiguate missing from already-completed.
            let existing = StudyRepo::find_session(&state.pool, auth_user.user_id, id)
                .await?
                .ok_or_else(|| not_found("StudySession", id))?;
            debug_assert!(existing.completed_at.is_some());
            Err(AppError::Core(CoreError::Conflict(
                "Study session is already completed".to_string(),
            )))
        }
    }
}

/// POST /api/v1/study-sessions/{id}/reviews
pub async fn record_review(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateReviewEvent>,
) -> AppResult<(StatusCode, Json<ReviewEvent>)> {
    validate_review_rating(input.rating).map_err(AppError::Core)?;

    let session = StudyRepo::find_session(&state.pool, auth_user.user_id, id)
        .await?
        .ok_or_else(|| not_found("StudySession", id))?;
    if session.completed_at.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Cannot record reviews on a completed session".to_string(),
        )));
    }

    // The flashcard must live in the session's deck; anything else is a
    // client bug or a foreign card, both read as 404.
    let in_deck =
        FlashcardRepo::belongs_to_deck(&state.pool, input.flashcard_id, session.deck_id).await?;
    if !in_deck {
        return Err(not_found("Flashcard", input.flashcard_id));
    }

    let event = StudyRepo::record_review(&state.pool, id, input.flashcard_id, input.rating).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/v1/study-sessions/{id}/summary
pub async fn summary(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<SessionSummary>> {
    let session = StudyRepo::find_session(&state.pool, auth_user.user_id, id)
        .await?
        .ok_or_else(|| not_found("StudySession", id))?;
    let counts = StudyRepo::review_counts(&state.pool, id).await?;

    let duration_secs = session
        .completed_at
        .map(|done| (done - session.started_at).num_seconds());

    Ok(Json(SessionSummary {
        session_id: session.id,
        deck_id: session.deck_id,
        started_at: session.started_at,
        completed_at: session.completed_at,
        duration_secs,
        counts,
    }))
}
