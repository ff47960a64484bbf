//! Generation request lifecycle status.
//!
//! The status machine is deliberately a closed enum rather than loose string
//! comparison: an unrecognized status string is a hard error at the parse
//! boundary, never a silent "stop polling".

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle of a [`generation request`](crate::status).
///
/// Transitions: `Pending -> Processing -> {Completed, Failed}`. Only the
/// background worker writes transitions; everything else observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl GenerationStatus {
    /// The string stored in the `generation_requests.status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationStatus::Pending => "pending",
            GenerationStatus::Processing => "processing",
            GenerationStatus::Completed => "completed",
            GenerationStatus::Failed => "failed",
        }
    }

    /// Whether the request has reached a terminal state.
    ///
    /// Terminal requests are never re-fetched by the status poller and are
    /// never picked up by the worker.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GenerationStatus::Completed | GenerationStatus::Failed
        )
    }
}

impl std::fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GenerationStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(GenerationStatus::Pending),
            "processing" => Ok(GenerationStatus::Processing),
            "completed" => Ok(GenerationStatus::Completed),
            "failed" => Ok(GenerationStatus::Failed),
            other => Err(CoreError::Validation(format!(
                "Unknown generation status '{other}'"
            ))),
        }
    }
}

impl TryFrom<String> for GenerationStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
