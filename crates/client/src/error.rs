use serde::Deserialize;

/// JSON error body shape returned by the API (`{"error": ..., "code": ...}`).
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    pub code: String,
}

/// Error type for all [`ApiClient`](crate::ApiClient) calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The generation-request budget is exhausted. The display form is the
    /// literal `RATE_LIMIT` so callers can match on it directly.
    #[error("RATE_LIMIT")]
    RateLimited,

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Status {
        status: u16,
        code: String,
        message: String,
    },

    /// The request never produced a usable response (connect, timeout, or
    /// body decode failure inside reqwest).
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
}

impl ClientError {
    /// Build an error from a non-2xx status and its (possibly unparsable)
    /// body.
    pub(crate) fn from_status(status: reqwest::StatusCode, body: &[u8]) -> Self {
        match serde_json::from_slice::<ApiErrorBody>(body) {
            Ok(parsed) => ClientError::Status {
                status: status.as_u16(),
                code: parsed.code,
                message: parsed.error,
            },
            Err(_) => ClientError::Status {
                status: status.as_u16(),
                code: "UNKNOWN".to_string(),
                message: format!("HTTP {status}"),
            },
        }
    }
}
