/// Error types for the storm timeline crates
use thiserror::Error;

/// Main error type for timeline and capture operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimelineError {
    /// A window with `start >= end` or non-finite bounds was requested
    #[error("Invalid time window: start {start} must be before end {end}")]
    InvalidWindow { start: f64, end: f64 },

    /// Timestamp string could not be parsed
    #[error("Failed to parse timestamp: {0}")]
    TimestampParse(String),

    /// Classification response body could not be decoded
    #[error("Failed to decode analysis response: {0}")]
    ResponseDecode(String),

    /// Classification or capture endpoint returned a non-success status
    #[error("Server responded with HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// Capture name was empty or whitespace
    #[error("Capture name is required")]
    CaptureNameRequired,

    /// Capture end is not after its start
    #[error("Capture end time must be after start time")]
    CaptureInvertedInterval,
}

impl From<serde_json::Error> for TimelineError {
    fn from(e: serde_json::Error) -> Self {
        TimelineError::ResponseDecode(e.to_string())
    }
}

/// Type alias for Results using TimelineError
pub type Result<T> = std::result::Result<T, TimelineError>;
