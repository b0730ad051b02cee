//! Core type definitions for memberstream.
//!
//! This crate defines the payloads that flow from the HTTP layer into the
//! stream dispatcher:
//! - Member records and their numeric identifiers
//! - Mutations (add, update, delete) and their event types
//! - The canonical event envelope written to the ingestion backend
//!
//! Nothing here performs I/O. Envelopes are built from a mutation and a clock
//! reading, then encoded as a single newline-terminated JSON record.

mod builder;
mod event;
mod ids;
mod member;
mod timestamp;

pub use builder::EnvelopeBuilder;
pub use event::{EventEnvelope, EventType, MemberDetails, Mutation};
pub use ids::MemberId;
pub use member::Member;
pub use timestamp::{DeleteTimestamp, format_utc};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
