//! Background worker that turns pending generation requests into candidate
//! flashcards.
//!
//! The worker claims the oldest pending request (skip-locked, so several
//! workers can share a table), calls the configured generator endpoint, and
//! writes the outcome back: candidates + `completed`, or `failed` with an
//! error message.

pub mod config;
pub mod generator;
pub mod runner;

pub use config::WorkerConfig;
pub use generator::{GeneratorClient, GeneratorError};
pub use runner::Runner;
