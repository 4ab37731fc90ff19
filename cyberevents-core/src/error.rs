//! Error types for CyberEvents.

use thiserror::Error;

/// Errors that can occur in CyberEvents operations.
#[derive(Error, Debug)]
pub enum CyberEventsError {
    #[error("Event data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Evento not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CyberEvents operations.
pub type CyberEventsResult<T> = Result<T, CyberEventsError>;
