//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Roster service error: {0}")]
    Roster(String),

    #[error("Emotion diary service error: {0}")]
    Diary(String),

    #[error("Exam service error: {0}")]
    Exam(String),

    #[error("Geolocation error: {0}")]
    Geolocation(String),

    /// Capability is absent on this platform. Expected condition, not a failure.
    #[error("Capability unsupported: {0}")]
    Unsupported(String),

    #[error("Input error: {0}")]
    Input(String),
}
