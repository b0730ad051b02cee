//! Turns mutations into backend records.

use crate::config::BackendMode;
use crate::error::StreamResult;
use crate::partition::PartitionKey;
use crate::sink::{Ack, RecordSink};
use memberstream_types::{EnvelopeBuilder, EventEnvelope, Mutation};
use std::sync::Arc;
use tracing::{debug, warn};

/// Encodes envelopes and hands them to the configured sink.
///
/// Stateless apart from the shared sink handle and the builder, so one
/// dispatcher serves every request concurrently.
pub struct Dispatcher {
    sink: Arc<dyn RecordSink>,
    builder: EnvelopeBuilder,
}

impl Dispatcher {
    pub fn new(sink: Arc<dyn RecordSink>, builder: EnvelopeBuilder) -> Self {
        Self { sink, builder }
    }

    /// The backend in use.
    pub fn mode(&self) -> BackendMode {
        self.sink.mode()
    }

    /// The target stream name.
    pub fn stream_name(&self) -> &str {
        self.sink.stream_name()
    }

    pub fn builder(&self) -> &EnvelopeBuilder {
        &self.builder
    }

    /// Sends one envelope.
    ///
    /// Makes exactly one backend call. A failure is returned as-is; nothing
    /// is retried.
    pub async fn dispatch(
        &self,
        envelope: &EventEnvelope,
        partition_key: &PartitionKey,
    ) -> StreamResult<Ack> {
        let record = envelope.to_record()?;
        let mode = self.sink.mode();
        if mode.uses_partition_key() {
            debug!(
                "Dispatching {} for member {} to {} ({} bytes, key {})",
                envelope.event_type(),
                envelope.member_id(),
                mode,
                record.len(),
                partition_key
            );
        } else {
            debug!(
                "Dispatching {} for member {} to {} ({} bytes)",
                envelope.event_type(),
                envelope.member_id(),
                mode,
                record.len()
            );
        }

        match self.sink.send(&record, partition_key).await {
            Ok(ack) => {
                debug!(
                    "{} accepted {} (request {})",
                    mode,
                    envelope.event_type(),
                    ack.request_id().unwrap_or("-")
                );
                Ok(ack)
            }
            Err(e) => {
                warn!(
                    "{} rejected {} for member {}: {}",
                    mode,
                    envelope.event_type(),
                    envelope.member_id(),
                    e
                );
                Err(e)
            }
        }
    }

    /// Builds the envelope for a mutation and dispatches it, keyed by the
    /// member identifier.
    pub async fn emit(&self, mutation: Mutation) -> StreamResult<Ack> {
        let partition_key = PartitionKey::from(mutation.member_id());
        let envelope = self.builder.build(mutation);
        self.dispatch(&envelope, &partition_key).await
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("mode", &self.sink.mode())
            .field("stream_name", &self.sink.stream_name())
            .field("builder", &self.builder)
            .finish()
    }
}
