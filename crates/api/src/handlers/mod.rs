//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers validate input via `fiszki_core::validation`, delegate to the
//! corresponding repository in `fiszki_db`, and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod auth;
pub mod deck;
pub mod domain;
pub mod flashcard;
pub mod generation;
pub mod study;
