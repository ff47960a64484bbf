use std::sync::Arc;

use crate::config::ServerConfig;
use crate::mailer::Mailer;
use crate::ratelimit::RateLimiter;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: fiszki_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Per-user rate limiter for generation-request creation.
    pub rate_limiter: Arc<RateLimiter>,
    /// Outgoing email transport (password resets).
    pub mailer: Arc<Mailer>,
}
