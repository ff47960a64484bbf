//! Route definitions for domains.

use axum::routing::get;
use axum::Router;

use crate::handlers::domain;
use crate::state::AppState;

/// Routes mounted at `/domains`.
///
/// ```text
/// GET  /  -> list
/// POST /  -> create (201 on insert, 200 on existing name)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(domain::list).post(domain::create))
}
