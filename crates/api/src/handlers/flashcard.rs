//! Handlers for flashcards, nested under `/decks/{deck_id}/flashcards` for
//! create/list and top-level `/flashcards/{id}` for item operations.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use fiszki_core::types::DbId;
use fiszki_core::validation::validate_flashcard;
use fiszki_db::models::flashcard::{
    CreateFlashcard, Flashcard, UpdateFlashcard, SOURCE_MANUAL,
};
use fiszki_db::repositories::FlashcardRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::auth::not_found;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::state::AppState;

/// POST /api/v1/decks/{deck_id}/flashcards
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(deck_id): Path<DbId>,
    Json(input): Json<CreateFlashcard>,
) -> AppResult<(StatusCode, Json<Flashcard>)> {
    validate_flashcard(&input.front, &input.back).map_err(AppError::Core)?;

    let card = FlashcardRepo::create(&state.pool, auth_user.user_id, deck_id, &input, SOURCE_MANUAL)
        .await?
        .ok_or_else(|| not_found("Deck", deck_id))?;
    Ok((StatusCode::CREATED, Json(card)))
}

/// GET /api/v1/decks/{deck_id}/flashcards
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(deck_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<Flashcard>>> {
    // An empty deck and a foreign deck both yield no rows; disambiguate so
    // the caller sees 404 for the latter.
    fiszki_db::repositories::DeckRepo::find_by_id(&state.pool, auth_user.user_id, deck_id)
        .await?
        .ok_or_else(|| not_found("Deck", deck_id))?;

    let cards = FlashcardRepo::list_for_deck(
        &state.pool,
        auth_user.user_id,
        deck_id,
        params.limit,
        params.offset,
    )
    .await?;
    Ok(Json(cards))
}

/// GET /api/v1/flashcards/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Flashcard>> {
    let card = FlashcardRepo::find_by_id(&state.pool, auth_user.user_id, id)
        .await?
        .ok_or_else(|| not_found("Flashcard", id))?;
    Ok(Json(card))
}

/// PATCH /api/v1/flashcards/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFlashcard>,
) -> AppResult<Json<Flashcard>> {
    // Validate the merged content so a patch cannot push a side over its cap.
    let current = FlashcardRepo::find_by_id(&state.pool, auth_user.user_id, id)
        .await?
        .ok_or_else(|| not_found("Flashcard", id))?;
    let front = input.front.as_deref().unwrap_or(&current.front);
    let back = input.back.as_deref().unwrap_or(&current.back);
    validate_flashcard(front, back).map_err(AppError::Core)?;

    let card = FlashcardRepo::update(&state.pool, auth_user.user_id, id, &input)
        .await?
        .ok_or_else(|| not_found("Flashcard", id))?;
    Ok(Json(card))
}

/// DELETE /api/v1/flashcards/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = FlashcardRepo::delete(&state.pool, auth_user.user_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Flashcard", id))
    }
}
