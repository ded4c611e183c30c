//! Error type shared by every PHY stage

/// Errors raised by the PHY pipeline stages.
///
/// Every stage validates its input up front and fails before producing
/// any output, so there is never a partially built sequence or frame.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModemError {
    /// Malformed input to a pipeline stage.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ModemError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, ModemError>;
