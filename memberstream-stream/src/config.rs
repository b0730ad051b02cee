//! Backend selection.
//!
//! Resolved once at startup from environment variables and never changed
//! afterwards. The variable names match the ones existing deployments
//! already set.

use crate::error::{StreamError, StreamResult};
use memberstream_types::DeleteTimestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `enabled` selects Firehose; anything else selects Kinesis.
pub const ENV_IS_FIREHOSE: &str = "IS_FIREHOSE";
pub const ENV_FIREHOSE_STREAM_NAME: &str = "FIREHOSE_STREAM_NAME";
pub const ENV_KINESIS_STREAM_NAME: &str = "KINESIS_STREAM_NAME";
pub const ENV_AWS_REGION: &str = "AWS_REGION";
pub const ENV_AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const ENV_AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const ENV_AWS_ENDPOINT_URL: &str = "AWS_ENDPOINT_URL";
pub const ENV_FLATTEN_DELETE_TIMESTAMP: &str = "FLATTEN_DELETE_TIMESTAMP";

/// Which streaming service records are delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendMode {
    /// Kinesis Data Firehose: named delivery stream, no partition key, the
    /// service buffers and batches internally.
    Firehose,
    /// Kinesis Data Streams: named stream, every record carries a partition
    /// key.
    #[default]
    Kinesis,
}

impl BackendMode {
    /// Resolves the mode from the `IS_FIREHOSE` flag value.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("enabled") => BackendMode::Firehose,
            _ => BackendMode::Kinesis,
        }
    }

    /// Returns whether records sent in this mode carry a partition key.
    pub fn uses_partition_key(&self) -> bool {
        matches!(self, BackendMode::Kinesis)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendMode::Firehose => "firehose",
            BackendMode::Kinesis => "kinesis",
        }
    }

    /// The environment variable holding the target stream name for this mode.
    pub fn stream_name_var(&self) -> &'static str {
        match self {
            BackendMode::Firehose => ENV_FIREHOSE_STREAM_NAME,
            BackendMode::Kinesis => ENV_KINESIS_STREAM_NAME,
        }
    }
}

impl fmt::Display for BackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A static AWS access key pair.
#[derive(Clone, PartialEq, Eq)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// Process-wide backend configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    /// Which backend receives records.
    pub mode: BackendMode,
    /// Delivery stream (Firehose) or stream (Kinesis) name.
    pub stream_name: String,
    /// AWS region. `None` defers to the SDK's default provider chain.
    pub region: Option<String>,
    /// Static credentials. `None` defers to the SDK's default provider chain.
    pub credentials: Option<AwsCredentials>,
    /// Endpoint override, e.g. LocalStack.
    pub endpoint_url: Option<String>,
    /// How delete events stamp their timestamp.
    pub delete_timestamp: DeleteTimestamp,
}

impl StreamConfig {
    /// Creates a config for the given backend and stream, everything else default.
    pub fn new(mode: BackendMode, stream_name: impl Into<String>) -> Self {
        Self {
            mode,
            stream_name: stream_name.into(),
            region: None,
            credentials: None,
            endpoint_url: None,
            delete_timestamp: DeleteTimestamp::default(),
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.credentials = Some(AwsCredentials {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        });
        self
    }

    pub fn with_endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }

    pub fn with_delete_timestamp(mut self, style: DeleteTimestamp) -> Self {
        self.delete_timestamp = style;
        self
    }

    /// Loads the configuration from the process environment.
    pub fn from_env() -> StreamResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> StreamResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let mode = BackendMode::from_flag(get(ENV_IS_FIREHOSE).as_deref());
        let stream_name = get(mode.stream_name_var()).ok_or_else(|| {
            StreamError::Config(format!(
                "{} must be set when the {} backend is selected",
                mode.stream_name_var(),
                mode
            ))
        })?;

        let credentials = match (get(ENV_AWS_ACCESS_KEY_ID), get(ENV_AWS_SECRET_ACCESS_KEY)) {
            (Some(access_key_id), Some(secret_access_key)) => Some(AwsCredentials {
                access_key_id,
                secret_access_key,
            }),
            (None, None) => None,
            _ => {
                return Err(StreamError::Config(format!(
                    "{ENV_AWS_ACCESS_KEY_ID} and {ENV_AWS_SECRET_ACCESS_KEY} must be set together"
                )));
            }
        };

        let delete_timestamp = match get(ENV_FLATTEN_DELETE_TIMESTAMP).as_deref() {
            Some("1" | "true" | "yes") => DeleteTimestamp::Flat,
            _ => DeleteTimestamp::Nested,
        };

        Ok(Self {
            mode,
            stream_name,
            region: get(ENV_AWS_REGION),
            credentials,
            endpoint_url: get(ENV_AWS_ENDPOINT_URL),
            delete_timestamp,
        })
    }
}
