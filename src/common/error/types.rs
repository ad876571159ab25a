//! Unified error types for deckwright.
use thiserror::Error;

/// Main error type for deckwright operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller-supplied content violates a precondition (mismatched chart
    /// arrays, malformed table rows, unreadable image, empty deck).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An external collaborator (text generation, pricing source) could not
    /// provide content.
    #[error("Collaborator unavailable: {0}")]
    CollaboratorUnavailable(String),

    /// IO error while writing to a sink or reading an input file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML generation or parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// ZIP container error
    #[error("ZIP error: {0}")]
    Zip(String),

    /// Invalid configuration (deck plan, pricing file)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidInput`].
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Whether this error reports a caller precondition violation.
    #[inline]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }
}

/// Result type for deckwright operations.
pub type Result<T> = std::result::Result<T, Error>;
