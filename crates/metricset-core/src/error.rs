//! Shared error type across metricset crates.
//!
//! Validation problems never surface here; they are reported through
//! [`crate::diag::Diagnostics`]. This type only covers the few hard failures.

use thiserror::Error;

/// Stable error codes (used by the tool's exit messages and tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Configuration could not be parsed or failed validation.
    InvalidConfig,
    /// Unsupported configuration version.
    UnsupportedVersion,
    /// Index outside of a sequence.
    OutOfRange,
    /// Reading input failed.
    Io,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::Io => "IO",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricSetError>;

/// Unified error type used by core and tool.
#[derive(Debug, Error)]
pub enum MetricSetError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },
    #[error("io: {0}")]
    Io(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl MetricSetError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            MetricSetError::InvalidConfig(_) => ErrorCode::InvalidConfig,
            MetricSetError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            MetricSetError::OutOfRange { .. } => ErrorCode::OutOfRange,
            MetricSetError::Io(_) => ErrorCode::Io,
            MetricSetError::Internal(_) => ErrorCode::Internal,
        }
    }
}
