//! Pagination defaults and clamping helpers.
//!
//! Lives in `core` (zero internal deps) so both the repository layer and the
//! client can share the same limits.

/// Default number of rows per page.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Maximum number of rows per page.
pub const MAX_LIST_LIMIT: i64 = 200;

/// Clamp a user-supplied limit into `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, max)
}

/// Clamp a user-supplied offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
