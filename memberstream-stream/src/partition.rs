//! Partition keys for the partition-keyed backend.

use crate::error::{StreamError, StreamResult};
use memberstream_types::MemberId;
use std::fmt;

/// Longest partition key Kinesis Data Streams accepts, in Unicode characters.
pub const MAX_PARTITION_KEY_LEN: usize = 256;

/// A non-empty key that groups records onto a shard.
///
/// Records sharing a key keep their relative order. Member events use the
/// decimal member identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartitionKey(String);

impl PartitionKey {
    /// Validates an arbitrary key.
    pub fn new(key: impl Into<String>) -> StreamResult<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(StreamError::InvalidPartitionKey("key is empty".into()));
        }
        let len = key.chars().count();
        if len > MAX_PARTITION_KEY_LEN {
            return Err(StreamError::InvalidPartitionKey(format!(
                "key is {len} characters, limit is {MAX_PARTITION_KEY_LEN}"
            )));
        }
        Ok(Self(key))
    }

    /// Returns the key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<MemberId> for PartitionKey {
    fn from(id: MemberId) -> Self {
        // An i64 renders to at most 20 characters.
        Self(id.to_string())
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PartitionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
