use crate::services::ServiceError;
use crate::types::ValueError;

/// Errors that can occur while building, filtering or resolving channels
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// A field value failed validation
    #[error(transparent)]
    Value(#[from] ValueError),

    /// Name filter is not a valid regular expression
    #[error("Invalid channel name pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Zero matches where exactly one was required
    #[error("No channels found matching '{0}'")]
    NotFound(String),

    /// More than one match where exactly one was required
    #[error(
        "Multiple matches for channel '{name}', ambiguous request:\n    {}",
        .candidates.join("\n    ")
    )]
    Ambiguous {
        /// Requested name
        name: String,
        /// One `name (type, rate)` line per match
        candidates: Vec<String>,
    },

    /// Remote service failure
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
