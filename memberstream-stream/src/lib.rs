//! Event emission to Amazon Kinesis Data Streams or Kinesis Data Firehose.
//!
//! # Components
//!
//! - **Config**: resolves the backend mode and stream name once at startup
//! - **Sink**: one [`RecordSink`] per backend, each making a single
//!   `PutRecord` call per record
//! - **Dispatcher**: builds envelopes from mutations, encodes them and sends
//!   them through the sink
//!
//! # Example
//!
//! ```
//! use memberstream_stream::{BackendMode, Dispatcher, mock::RecordingSink};
//! use memberstream_types::{EnvelopeBuilder, MemberId, Mutation};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let sink = RecordingSink::new(BackendMode::Kinesis, "members");
//! let dispatcher = Dispatcher::new(Arc::new(sink.clone()), EnvelopeBuilder::default());
//!
//! dispatcher.emit(Mutation::Delete { id: MemberId::new(42) }).await.unwrap();
//! assert_eq!(sink.calls()[0].partition_key, "42");
//! # });
//! ```

mod backend;
pub mod config;
mod dispatcher;
mod error;
pub mod firehose;
pub mod kinesis;
mod partition;
pub mod sink;

pub use backend::{connect, load_sdk_config};
pub use config::{AwsCredentials, BackendMode, StreamConfig};
pub use dispatcher::Dispatcher;
pub use error::{StreamError, StreamResult};
pub use firehose::FirehoseSink;
pub use kinesis::KinesisSink;
pub use partition::{MAX_PARTITION_KEY_LEN, PartitionKey};
pub use sink::{Ack, RecordSink, mock};
