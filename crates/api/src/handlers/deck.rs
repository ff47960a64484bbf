//! Handlers for the `/decks` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fiszki_core::types::DbId;
use fiszki_core::validation::validate_deck_name;
use fiszki_db::models::deck::{CreateDeck, Deck, DeckListFilter, UpdateDeck};
use fiszki_db::repositories::{DeckRepo, DomainRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::auth::not_found;
use crate::middleware::auth::AuthUser;
use crate::query::{DeckListParams, SortOrder};
use crate::state::AppState;

/// POST /api/v1/decks
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(mut input): Json<CreateDeck>,
) -> AppResult<(StatusCode, Json<Deck>)> {
    input.name = validate_deck_name(&input.name).map_err(AppError::Core)?;

    // A foreign domain id must not be attachable to this user's deck.
    if let Some(domain_id) = input.domain_id {
        DomainRepo::find_by_id(&state.pool, auth_user.user_id, domain_id)
            .await?
            .ok_or_else(|| not_found("Domain", domain_id))?;
    }

    let deck = DeckRepo::create(&state.pool, auth_user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(deck)))
}

/// GET /api/v1/decks
///
/// Supports `limit`, `offset`, `sort`, `order`, `q`, `domain_id`, and
/// `include_counts` query parameters.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<DeckListParams>,
) -> AppResult<Response> {
    let filter = DeckListFilter {
        domain_id: params.domain_id,
        q: params.q.clone(),
        sort: params.sort,
        descending: matches!(params.order, SortOrder::Desc),
        limit: params.limit,
        offset: params.offset,
    };

    if params.include_counts {
        let decks = DeckRepo::list_with_counts(&state.pool, auth_user.user_id, &filter).await?;
        Ok(Json(decks).into_response())
    } else {
        let decks = DeckRepo::list(&state.pool, auth_user.user_id, &filter).await?;
        Ok(Json(decks).into_response())
    }
}

/// GET /api/v1/decks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Deck>> {
    let deck = DeckRepo::find_by_id(&state.pool, auth_user.user_id, id)
        .await?
        .ok_or_else(|| not_found("Deck", id))?;
    Ok(Json(deck))
}

/// PATCH /api/v1/decks/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateDeck>,
) -> AppResult<Json<Deck>> {
    if let Some(name) = &input.name {
        input.name = Some(validate_deck_name(name).map_err(AppError::Core)?);
    }
    if let Some(domain_id) = input.domain_id {
        DomainRepo::find_by_id(&state.pool, auth_user.user_id, domain_id)
            .await?
            .ok_or_else(|| not_found("Domain", domain_id))?;
    }

    let deck = DeckRepo::update(&state.pool, auth_user.user_id, id, &input)
        .await?
        .ok_or_else(|| not_found("Deck", id))?;
    Ok(Json(deck))
}

/// DELETE /api/v1/decks/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = DeckRepo::delete(&state.pool, auth_user.user_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Deck", id))
    }
}
