//! Error types for section loading

use thiserror::Error;

/// Errors raised while resolving a section id
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No section is stored under the requested id
    #[error("Section not found: {0}")]
    NotFound(String),

    /// The backing store could not be read
    #[error("Failed to read section '{id}': {source}")]
    Io {
        id: String,
        #[source]
        source: std::io::Error,
    },

    /// The section data is not valid JSON for the authored format
    #[error("Malformed section '{id}': {source}")]
    Parse {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    /// The section data parsed but violates a section invariant
    #[error("Invalid section '{id}': {source}")]
    Invalid {
        id: String,
        #[source]
        source: ValidationError,
    },
}

impl RepositoryError {
    /// The section id the failure refers to
    pub fn section_id(&self) -> &str {
        match self {
            Self::NotFound(id) => id,
            Self::Io { id, .. } | Self::Parse { id, .. } | Self::Invalid { id, .. } => id,
        }
    }

    /// Whether the id simply does not exist in the repository
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Section invariants checked at the authored-data boundary
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Entity ids must be unique within a section
    #[error("duplicate entity id '{0}'")]
    DuplicateEntity(String),

    /// Proximity thresholds must be non-negative
    #[error("entity '{entity}' has a negative proximity distance {distance}")]
    NegativeDistance { entity: String, distance: f32 },

    /// Entity ids must not be empty
    #[error("entity #{0} has an empty id")]
    EmptyEntityId(usize),
}

/// Result type for repository operations
pub type Result<T> = std::result::Result<T, RepositoryError>;
