//! Domain entity model and DTOs.

use fiszki_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A domain row from the `domains` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Domain {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new domain.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDomain {
    pub name: String,
}
