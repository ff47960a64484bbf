//! Deck entity model and DTOs.

use fiszki_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A deck row from the `decks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Deck {
    pub id: DbId,
    pub user_id: DbId,
    pub domain_id: Option<DbId>,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A deck row joined with its flashcard count (`?include_counts=true`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeckWithCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub deck: Deck,
    pub flashcard_count: i64,
}

/// DTO for creating a new deck.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDeck {
    pub name: String,
    pub description: Option<String>,
    pub domain_id: Option<DbId>,
}

/// DTO for updating an existing deck. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDeck {
    pub name: Option<String>,
    pub description: Option<String>,
    pub domain_id: Option<DbId>,
}

/// Filtering, sorting, and pagination arguments for deck listing.
///
/// `sort` is restricted to whitelisted columns by construction; it never
/// carries raw user input into SQL.
#[derive(Debug, Clone, Default)]
pub struct DeckListFilter {
    pub domain_id: Option<DbId>,
    /// Case-insensitive substring match on the deck name.
    pub q: Option<String>,
    pub sort: DeckSortColumn,
    pub descending: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Whitelisted sort columns for deck listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckSortColumn {
    Name,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl DeckSortColumn {
    pub fn column(self) -> &'static str {
        match self {
            DeckSortColumn::Name => "name",
            DeckSortColumn::CreatedAt => "created_at",
            DeckSortColumn::UpdatedAt => "updated_at",
        }
    }
}
