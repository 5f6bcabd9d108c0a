/// Errors raised while validating channel field values
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    /// Channel type not found in the alias table
    #[error("Channel type '{0}' not understood")]
    InvalidChannelType(String),

    /// Sample rate could not be parsed as a non-negative frequency
    #[error("Invalid sample rate: {0}")]
    InvalidSampleRate(String),

    /// Unit string rejected by the unit grammar
    #[error("Invalid unit: {0}")]
    InvalidUnit(String),

    /// Numeric type name not recognised
    #[error("Invalid data type: {0}")]
    InvalidDataType(String),
}
