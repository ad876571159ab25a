/// Error types for collaborator calls.
use thiserror::Error;

/// Why a collaborator could not provide content.
#[derive(Error, Debug)]
pub enum CollabError {
    /// The service or source could not be reached
    #[error("Collaborator unavailable: {0}")]
    Unavailable(String),

    /// The source answered with something unusable
    #[error("Malformed collaborator response: {0}")]
    Malformed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CollabError> for crate::common::Error {
    fn from(err: CollabError) -> Self {
        crate::common::Error::CollaboratorUnavailable(err.to_string())
    }
}
