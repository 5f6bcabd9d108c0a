/// Errors reported by remote metadata services
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Could not reach or authenticate with the service
    #[error("Connection to {host} failed: {reason}")]
    Connection {
        /// Host that was contacted
        host: String,
        /// Failure description
        reason: String,
    },

    /// No response within the requested timeout
    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The service answered with something that could not be understood
    #[error("Protocol error: {0}")]
    Protocol(String),
}
