//! Route definitions for item-level flashcard operations.
//!
//! Creation and listing live under the owning deck, see
//! [`super::deck::router`].

use axum::routing::get;
use axum::Router;

use crate::handlers::flashcard;
use crate::state::AppState;

/// Routes mounted at `/flashcards`.
///
/// ```text
/// GET    /{id}  -> get_by_id
/// PATCH  /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(flashcard::get_by_id)
            .patch(flashcard::update)
            .delete(flashcard::delete),
    )
}
