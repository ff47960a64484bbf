//! Shared query parameter types for API handlers.

use fiszki_core::types::DbId;
use fiszki_db::models::deck::DeckSortColumn;
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the repository layer via `clamp_limit` /
/// `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Sort direction for list endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Query parameters for `GET /decks`.
#[derive(Debug, Deserialize)]
pub struct DeckListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    #[serde(default)]
    pub sort: DeckSortColumn,
    #[serde(default)]
    pub order: SortOrder,
    /// Case-insensitive substring filter on the deck name.
    pub q: Option<String>,
    pub domain_id: Option<DbId>,
    /// Attach per-deck flashcard counts to the response.
    #[serde(default)]
    pub include_counts: bool,
}
