//! Kinesis Data Streams delivery.

use crate::config::BackendMode;
use crate::error::{StreamError, StreamResult};
use crate::partition::PartitionKey;
use crate::sink::{Ack, RecordSink};
use async_trait::async_trait;
use aws_sdk_kinesis::error::DisplayErrorContext;
use aws_sdk_kinesis::operation::RequestId;
use aws_sdk_kinesis::primitives::Blob;
use aws_sdk_kinesis::Client;
use aws_types::SdkConfig;

/// Sends records to a named Kinesis data stream, keyed by partition.
#[derive(Debug, Clone)]
pub struct KinesisSink {
    client: Client,
    stream_name: String,
}

impl KinesisSink {
    pub fn new(client: Client, stream_name: impl Into<String>) -> Self {
        Self {
            client,
            stream_name: stream_name.into(),
        }
    }

    /// Creates the sink with a fresh client built from shared SDK config.
    pub fn from_conf(sdk_config: &SdkConfig, stream_name: impl Into<String>) -> Self {
        Self::new(Client::new(sdk_config), stream_name)
    }
}

#[async_trait]
impl RecordSink for KinesisSink {
    fn mode(&self) -> BackendMode {
        BackendMode::Kinesis
    }

    fn stream_name(&self) -> &str {
        &self.stream_name
    }

    async fn send(&self, record: &[u8], partition_key: &PartitionKey) -> StreamResult<Ack> {
        let output = self
            .client
            .put_record()
            .stream_name(&self.stream_name)
            .data(Blob::new(record))
            .partition_key(partition_key.as_str())
            .send()
            .await
            .map_err(|e| StreamError::dispatch(DisplayErrorContext(&e)))?;

        Ok(Ack::new()
            .with("ShardId", Some(output.shard_id()))
            .with("SequenceNumber", Some(output.sequence_number()))
            .with(
                "EncryptionType",
                output.encryption_type().map(|kind| kind.as_str()),
            )
            .with_request_id(output.request_id()))
    }
}
