//! Domain types, validation rules, and the shared error taxonomy.
//!
//! This crate has no internal dependencies so the DB layer, the API server,
//! the background worker, and the client can all use it.

pub mod error;
pub mod pagination;
pub mod status;
pub mod types;
pub mod validation;

pub use error::CoreError;
pub use status::GenerationStatus;
pub use types::{DbId, Timestamp};
