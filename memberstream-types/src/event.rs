//! Event types for member mutations.
//!
//! Every mutation accepted over HTTP produces exactly one [`EventEnvelope`].
//! The envelope is immutable and is written to the backend as one line of
//! JSON with the keys `eventType`, `details`, `timestamp` in that order.

use crate::{Member, MemberId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of mutation an envelope describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    AddMember,
    UpdateMember,
    DeleteMember,
}

impl EventType {
    /// Returns the wire name of this event type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AddMember => "add_member",
            Self::UpdateMember => "update_member",
            Self::DeleteMember => "delete_member",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mutation requested by a caller.
///
/// Each variant fixes both the event type and the payload shape, so an
/// envelope can never pair `delete_member` with a full member or
/// `add_member` with a bare identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// A new member was submitted.
    Add(Member),
    /// An existing member was replaced.
    Update(Member),
    /// A member was removed. Only the identifier is known.
    Delete { id: MemberId },
}

impl Mutation {
    /// Returns the event type this mutation is recorded as.
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::Add(_) => EventType::AddMember,
            Self::Update(_) => EventType::UpdateMember,
            Self::Delete { .. } => EventType::DeleteMember,
        }
    }

    /// Returns the identifier of the member being mutated.
    #[must_use]
    pub fn member_id(&self) -> MemberId {
        match self {
            Self::Add(member) | Self::Update(member) => member.id,
            Self::Delete { id } => *id,
        }
    }
}

/// The `details` field of an envelope.
///
/// Untagged on the wire: a full member object for add and update, or
/// `{"id": <id>}` for delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemberDetails {
    /// The complete member record.
    Member(Member),
    /// Only the identifier of a deleted member.
    Deleted { id: MemberId },
}

impl MemberDetails {
    /// Returns the member identifier present in either shape.
    #[must_use]
    pub fn member_id(&self) -> MemberId {
        match self {
            Self::Member(member) => member.id,
            Self::Deleted { id } => *id,
        }
    }
}

/// The canonical record sent to the ingestion backend.
///
/// Build one with [`crate::EnvelopeBuilder`]. Fields are private so a built
/// envelope cannot be altered before it is dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope {
    event_type: EventType,
    details: MemberDetails,
    timestamp: String,
}

impl EventEnvelope {
    pub(crate) fn new(event_type: EventType, details: MemberDetails, timestamp: String) -> Self {
        Self {
            event_type,
            details,
            timestamp,
        }
    }

    /// The kind of mutation.
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        self.event_type
    }

    /// The mutation payload.
    #[must_use]
    pub const fn details(&self) -> &MemberDetails {
        &self.details
    }

    /// The timestamp field exactly as it will be written.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// The identifier of the member this envelope is about.
    #[must_use]
    pub fn member_id(&self) -> MemberId {
        self.details.member_id()
    }

    /// Encodes the envelope as a single line of compact JSON followed by `\n`.
    ///
    /// The output is deterministic: equal envelopes encode to identical bytes.
    pub fn encode(&self) -> crate::Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }

    /// Encodes the envelope as the raw record bytes sent to the backend.
    pub fn to_record(&self) -> crate::Result<Vec<u8>> {
        self.encode().map(String::into_bytes)
    }

    /// Parses a record previously produced by [`EventEnvelope::encode`].
    pub fn decode(record: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(record.trim_end_matches('\n'))?)
    }
}
