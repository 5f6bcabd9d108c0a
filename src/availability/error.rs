use crate::time::TimeError;

/// Errors that can occur while querying data availability
#[derive(Debug, thiserror::Error)]
pub enum AvailabilityError {
    /// The query tool could not be started
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A request has no channel name before its `%<rate>` suffix
    #[error("Requested channel {position} has an empty name")]
    EmptyName {
        /// 0-based position in the request list
        position: usize,
    },

    /// The query tool exited unsuccessfully
    #[error(
        "Command '{command}' returned non-zero exit status {}:\n{stderr}",
        .code.map_or_else(|| "(killed by signal)".to_string(), |c| c.to_string())
    )]
    ToolInvocation {
        /// Full command line that was run
        command: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// The query tool reported an error of its own in its output
    #[error("{0}")]
    Tool(String),

    /// The query tool's output did not follow the expected line grammar
    #[error("Error parsing availability output at line {line_number} ({reason}):\n{line}")]
    Parse {
        /// 1-based line number in the tool output
        line_number: usize,
        /// Offending line
        line: String,
        /// What was wrong with it
        reason: String,
    },

    /// Start or end time could not be converted to GPS
    #[error(transparent)]
    Time(#[from] TimeError),
}

impl AvailabilityError {
    pub(crate) fn parse(line_number: usize, line: &str, reason: impl Into<String>) -> Self {
        AvailabilityError::Parse {
            line_number,
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}
