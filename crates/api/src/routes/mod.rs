pub mod auth;
pub mod deck;
pub mod domain;
pub mod flashcard;
pub mod generation;
pub mod health;
pub mod study;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
/// /auth/reset-password                 request password reset (public)
/// /auth/reset-password/confirm         confirm reset with token (public)
///
/// /domains                             list, create (idempotent by name)
///
/// /decks                               list (filter/sort/search), create
/// /decks/{id}                          get, update, delete
/// /decks/{deck_id}/flashcards          list, create
///
/// /flashcards/{id}                     get, update, delete
///
/// /generation-requests                 list, create (rate limited)
/// /generation-requests/{id}            get with candidates (polling)
/// /generation-requests/{id}/accept     accept candidates into a deck
///
/// /study-sessions                      list, create
/// /study-sessions/{id}                 get
/// /study-sessions/{id}/complete        complete (PATCH)
/// /study-sessions/{id}/reviews         record review (POST)
/// /study-sessions/{id}/summary         aggregated summary (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication and password reset.
        .nest("/auth", auth::router())
        // Domains: top-level subject areas, idempotent create.
        .nest("/domains", domain::router())
        // Decks and deck-scoped flashcard collection.
        .nest("/decks", deck::router())
        // Item-level flashcard operations.
        .nest("/flashcards", flashcard::router())
        // AI generation requests and candidate acceptance.
        .nest("/generation-requests", generation::router())
        // Study sessions and review events.
        .nest("/study-sessions", study::router())
}
