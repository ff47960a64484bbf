//! Typed REST client for the fiszki API.
//!
//! [`ApiClient`] wraps every endpoint in a method returning
//! `Result<T, ClientError>`; errors are values, never panics.
//! [`StatusPoller`] watches a single generation request until it reaches a
//! terminal status, re-fetching on a fixed timer.

pub mod client;
pub mod error;
pub mod poller;
pub mod state;
pub mod types;

pub use client::ApiClient;
pub use error::ClientError;
pub use poller::{PollSnapshot, StatusPoller, POLL_INTERVAL};
pub use state::ResourceState;
