//! The member record carried by add and update events.

use crate::MemberId;
use serde::{Deserialize, Serialize};

/// A member as submitted by the caller.
///
/// Every field is required. Values are passed through untouched: email and
/// phone formats, age ranges and the timestamp string are not checked here or
/// anywhere downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub age: i64,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Caller-supplied timestamp, reused verbatim as the envelope timestamp.
    pub timestamp: String,
}
