//! Builds event envelopes from mutations.

use crate::event::{EventEnvelope, MemberDetails, Mutation};
use crate::DeleteTimestamp;
use chrono::{DateTime, Utc};

/// Turns mutations into envelopes.
///
/// Holds only the delete timestamp style, so a single builder can be shared
/// freely across request handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnvelopeBuilder {
    delete_timestamp: DeleteTimestamp,
}

impl EnvelopeBuilder {
    /// Creates a builder that writes delete timestamps in the given style.
    #[must_use]
    pub const fn new(delete_timestamp: DeleteTimestamp) -> Self {
        Self { delete_timestamp }
    }

    /// Returns the delete timestamp style.
    #[must_use]
    pub const fn delete_timestamp(&self) -> DeleteTimestamp {
        self.delete_timestamp
    }

    /// Builds the envelope for a mutation, reading the clock for deletes.
    #[must_use]
    pub fn build(&self, mutation: Mutation) -> EventEnvelope {
        self.build_at(mutation, Utc::now())
    }

    /// Builds the envelope for a mutation with an explicit clock reading.
    ///
    /// `now` is only used for deletes; add and update keep the member's own
    /// timestamp.
    #[must_use]
    pub fn build_at(&self, mutation: Mutation, now: DateTime<Utc>) -> EventEnvelope {
        let event_type = mutation.event_type();
        match mutation {
            Mutation::Add(member) | Mutation::Update(member) => {
                let timestamp = member.timestamp.clone();
                EventEnvelope::new(event_type, MemberDetails::Member(member), timestamp)
            }
            Mutation::Delete { id } => EventEnvelope::new(
                event_type,
                MemberDetails::Deleted { id },
                self.delete_timestamp.render(now),
            ),
        }
    }
}
