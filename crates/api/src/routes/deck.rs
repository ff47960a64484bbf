//! Route definitions for decks and their flashcard collection.

use axum::routing::get;
use axum::Router;

use crate::handlers::{deck, flashcard};
use crate::state::AppState;

/// Routes mounted at `/decks`.
///
/// ```text
/// GET    /                       -> list (filter/sort/search)
/// POST   /                       -> create
/// GET    /{id}                   -> get_by_id
/// PATCH  /{id}                   -> update
/// DELETE /{id}                   -> delete
/// GET    /{deck_id}/flashcards   -> flashcard::list
/// POST   /{deck_id}/flashcards   -> flashcard::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(deck::list).post(deck::create))
        .route(
            "/{id}",
            get(deck::get_by_id).patch(deck::update).delete(deck::delete),
        )
        .route(
            "/{deck_id}/flashcards",
            get(flashcard::list).post(flashcard::create),
        )
}
