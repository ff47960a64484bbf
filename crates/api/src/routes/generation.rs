//! Route definitions for AI generation requests.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::generation;
use crate::state::AppState;

/// Routes mounted at `/generation-requests`.
///
/// ```text
/// GET  /              -> list
/// POST /              -> create (rate limited, 429 RATE_LIMIT)
/// GET  /{id}          -> get_by_id (polling endpoint, includes candidates)
/// POST /{id}/accept   -> accept candidates into a deck
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(generation::list).post(generation::create))
        .route("/{id}", get(generation::get_by_id))
        .route("/{id}/accept", post(generation::accept))
}
