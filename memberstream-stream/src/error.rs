//! Stream dispatch error types.

use thiserror::Error;

/// Result type for stream operations.
pub type StreamResult<T> = Result<T, StreamError>;

/// Errors that can occur while configuring or dispatching to a stream.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The backend rejected or failed to receive a record.
    ///
    /// Covers connectivity, authorization, throttling, malformed records and
    /// unknown streams alike. Displays the backend's own message unchanged.
    #[error("{0}")]
    Dispatch(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid partition key: {0}")]
    InvalidPartitionKey(String),

    #[error("envelope error: {0}")]
    Envelope(#[from] memberstream_types::Error),
}

impl StreamError {
    /// Returns true if the backend call itself failed.
    pub fn is_dispatch(&self) -> bool {
        matches!(self, StreamError::Dispatch(_))
    }

    /// Wraps any displayable backend error as a dispatch failure.
    pub(crate) fn dispatch(err: impl std::fmt::Display) -> Self {
        StreamError::Dispatch(err.to_string())
    }
}
