//! The delivery abstraction shared by both backends.
//!
//! Exactly one [`RecordSink`] is constructed at startup and shared by every
//! request. Implementations make one backend call per `send` and never retry.

use crate::config::BackendMode;
use crate::error::StreamResult;
use crate::partition::PartitionKey;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// The backend's acknowledgement of a record.
///
/// Kept as the service's own field names and forwarded to callers verbatim;
/// nothing in this crate interprets it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ack(Map<String, Value>);

impl Ack {
    /// Creates an empty acknowledgement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, skipping `None`.
    pub fn with(mut self, key: &str, value: Option<impl Into<Value>>) -> Self {
        if let Some(value) = value {
            self.0.insert(key.to_string(), value.into());
        }
        self
    }

    /// Looks up a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Records the AWS request id as `ResponseMetadata.RequestId`, skipping
    /// `None`.
    pub fn with_request_id(self, request_id: Option<&str>) -> Self {
        self.with(
            "ResponseMetadata",
            request_id.map(|id| json!({ "RequestId": id })),
        )
    }

    /// The AWS request id the backend answered with, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.0.get("ResponseMetadata")?.get("RequestId")?.as_str()
    }
}

/// A backend that accepts encoded records.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Which backend this sink delivers to.
    fn mode(&self) -> BackendMode;

    /// The target stream name.
    fn stream_name(&self) -> &str;

    /// Sends one record.
    ///
    /// Partition-keyed backends attach `partition_key`; the others ignore it.
    /// Any backend failure is returned as [`crate::StreamError::Dispatch`].
    async fn send(&self, record: &[u8], partition_key: &PartitionKey) -> StreamResult<Ack>;
}

/// An in-memory sink for tests.
pub mod mock {
    use super::*;
    use crate::error::StreamError;
    use std::sync::{Arc, Mutex};

    /// One call observed by [`RecordingSink`].
    #[derive(Debug, Clone, PartialEq)]
    pub struct SentRecord {
        /// The raw record bytes.
        pub record: Vec<u8>,
        /// The partition key passed to `send`.
        pub partition_key: String,
        /// Whether the call was answered with a failure.
        pub failed: bool,
    }

    impl SentRecord {
        /// The record as text.
        pub fn text(&self) -> String {
            String::from_utf8_lossy(&self.record).into_owned()
        }
    }

    /// Records every `send` call instead of contacting a backend.
    ///
    /// Clones share the same call log, so a test can keep one handle while
    /// the server owns another.
    #[derive(Debug, Clone)]
    pub struct RecordingSink {
        mode: BackendMode,
        stream_name: String,
        calls: Arc<Mutex<Vec<SentRecord>>>,
        failure: Arc<Mutex<Option<String>>>,
    }

    impl RecordingSink {
        /// Creates a sink that acknowledges every record.
        pub fn new(mode: BackendMode, stream_name: impl Into<String>) -> Self {
            Self {
                mode,
                stream_name: stream_name.into(),
                calls: Arc::new(Mutex::new(Vec::new())),
                failure: Arc::new(Mutex::new(None)),
            }
        }

        /// Makes every following call fail with `message`.
        pub fn fail_with(&self, message: impl Into<String>) {
            *self.failure.lock().unwrap() = Some(message.into());
        }

        /// Makes following calls succeed again.
        pub fn succeed(&self) {
            *self.failure.lock().unwrap() = None;
        }

        /// Every call seen so far, in order.
        pub fn calls(&self) -> Vec<SentRecord> {
            self.calls.lock().unwrap().clone()
        }

        /// Number of calls seen so far.
        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn ack(&self, sequence: usize) -> Ack {
            match self.mode {
                BackendMode::Firehose => Ack::new()
                    .with("RecordId", Some(format!("record-{sequence}")))
                    .with("Encrypted", Some(false)),
                BackendMode::Kinesis => Ack::new()
                    .with("ShardId", Some("shardId-000000000000"))
                    .with("SequenceNumber", Some(sequence.to_string())),
            }
        }
    }

    #[async_trait]
    impl RecordSink for RecordingSink {
        fn mode(&self) -> BackendMode {
            self.mode
        }

        fn stream_name(&self) -> &str {
            &self.stream_name
        }

        async fn send(&self, record: &[u8], partition_key: &PartitionKey) -> StreamResult<Ack> {
            let failure = self.failure.lock().unwrap().clone();
            let mut calls = self.calls.lock().unwrap();
            calls.push(SentRecord {
                record: record.to_vec(),
                partition_key: partition_key.as_str().to_string(),
                failed: failure.is_some(),
            });
            match failure {
                Some(message) => Err(StreamError::Dispatch(message)),
                None => Ok(self.ack(calls.len())),
            }
        }
    }
}
