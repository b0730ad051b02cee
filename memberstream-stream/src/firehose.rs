//! Kinesis Data Firehose delivery.

use crate::config::BackendMode;
use crate::error::{StreamError, StreamResult};
use crate::partition::PartitionKey;
use crate::sink::{Ack, RecordSink};
use async_trait::async_trait;
use aws_sdk_firehose::error::DisplayErrorContext;
use aws_sdk_firehose::operation::RequestId;
use aws_sdk_firehose::primitives::Blob;
use aws_sdk_firehose::types::Record;
use aws_sdk_firehose::Client;
use aws_types::SdkConfig;

/// Sends records to a named Firehose delivery stream.
///
/// Firehose has no notion of partition keys, so none is ever sent.
#[derive(Debug, Clone)]
pub struct FirehoseSink {
    client: Client,
    delivery_stream_name: String,
}

impl FirehoseSink {
    pub fn new(client: Client, delivery_stream_name: impl Into<String>) -> Self {
        Self {
            client,
            delivery_stream_name: delivery_stream_name.into(),
        }
    }

    /// Creates the sink with a fresh client built from shared SDK config.
    pub fn from_conf(sdk_config: &SdkConfig, delivery_stream_name: impl Into<String>) -> Self {
        Self::new(Client::new(sdk_config), delivery_stream_name)
    }
}

#[async_trait]
impl RecordSink for FirehoseSink {
    fn mode(&self) -> BackendMode {
        BackendMode::Firehose
    }

    fn stream_name(&self) -> &str {
        &self.delivery_stream_name
    }

    async fn send(&self, record: &[u8], _partition_key: &PartitionKey) -> StreamResult<Ack> {
        let record = Record::builder()
            .data(Blob::new(record))
            .build()
            .map_err(StreamError::dispatch)?;

        let output = self
            .client
            .put_record()
            .delivery_stream_name(&self.delivery_stream_name)
            .record(record)
            .send()
            .await
            .map_err(|e| StreamError::dispatch(DisplayErrorContext(&e)))?;

        Ok(Ack::new()
            .with("RecordId", Some(output.record_id()))
            .with("Encrypted", output.encrypted())
            .with_request_id(output.request_id()))
    }
}
