use thiserror::Error;

/// Failures surfaced by the pattern store and the alert engine.
///
/// None of these are fatal to classification: the engine keeps processing
/// samples after any of them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid reading (day {day}, hour {hour}, minute {minute})")]
    InvalidInput { day: u32, hour: u8, minute: u8 },

    #[error("pattern storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("failed to write pattern storage: {0}")]
    WriteError(String),

    #[error("invalid pattern: {0}")]
    ValidationError(String),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
