//! Streaming error types

use crate::scene::TriggerId;
use corridor_section::RepositoryError;
use thiserror::Error;

/// Failures of a single anomaly roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectError {
    /// The anomaly pool is empty
    #[error("No anomaly sections available")]
    NoAnomaliesAvailable,

    /// Chance is not a percentage
    #[error("Anomaly chance {0} is outside 0..=100")]
    ChanceOutOfRange(u8),
}

/// Errors reported by the section streamer
#[derive(Debug, Error)]
pub enum StreamError {
    /// The session cannot begin without its first section
    #[error("Initial section '{section_id}' could not be loaded: {source}")]
    InitialSectionMissing {
        section_id: String,
        #[source]
        source: RepositoryError,
    },

    /// A transition target could not be resolved; the live section is untouched
    #[error("Failed to load section '{section_id}': {source}")]
    SectionLoadFailed {
        section_id: String,
        #[source]
        source: RepositoryError,
    },

    #[error("Streamer has not been started")]
    NotStarted,

    #[error("Streamer is already started")]
    AlreadyStarted,

    /// The trigger index does not exist in the live section
    #[error("Unknown exit trigger {0}")]
    UnknownTrigger(TriggerId),
}

impl StreamError {
    /// Id of the section that failed to load, if any
    pub fn section_id(&self) -> Option<&str> {
        match self {
            Self::InitialSectionMissing { section_id, .. } | Self::SectionLoadFailed { section_id, .. } => {
                Some(section_id)
            }
            _ => None,
        }
    }

    /// Whether the session can keep running after this error
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InitialSectionMissing { .. })
    }
}

/// Invalid streaming configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("anomaly_chance_percent must be within 0..=100, got {0}")]
    ChanceOutOfRange(u8),

    #[error("initial_section_id must not be empty")]
    EmptyInitialSection,

    #[error("anomaly_pool entry #{0} is empty")]
    EmptyPoolEntry(usize),

    #[error("agent_tag must not be empty")]
    EmptyAgentTag,
}

/// Result type for streamer operations
pub type Result<T> = std::result::Result<T, StreamError>;
