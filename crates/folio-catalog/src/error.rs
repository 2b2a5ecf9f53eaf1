//! Error types for the catalog.

use thiserror::Error;

use crate::project::ProjectId;

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in catalog operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No project with this id
    #[error("Project not found: {0}")]
    UnknownProject(ProjectId),

    /// Two records share an id
    #[error("Duplicate project id: {0}")]
    DuplicateProject(ProjectId),

    /// Catalog data could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
