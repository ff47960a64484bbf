//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod deck;
pub mod domain;
pub mod flashcard;
pub mod generation;
pub mod password_reset;
pub mod session;
pub mod study;
pub mod user;
