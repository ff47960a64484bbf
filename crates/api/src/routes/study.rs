//! Route definitions for study sessions and review events.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::study;
use crate::state::AppState;

/// Routes mounted at `/study-sessions`.
///
/// ```text
/// GET   /               -> list
/// POST  /               -> create
/// GET   /{id}           -> get_by_id
/// PATCH /{id}/complete  -> complete (409 when already completed)
/// POST  /{id}/reviews   -> record_review
/// GET   /{id}/summary   -> summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(study::list).post(study::create))
        .route("/{id}", get(study::get_by_id))
        .route("/{id}/complete", patch(study::complete))
        .route("/{id}/reviews", post(study::record_review))
        .route("/{id}/summary", get(study::summary))
}
