//! Member mutation handlers.

use axum::{
    extract::{Path, State},
    response::Json,
};
use memberstream_stream::Ack;
use memberstream_types::{Member, MemberId, Mutation};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{error::ApiResult, AppState};

pub const MEMBER_ADDED: &str = "Member added successfully";
pub const MEMBER_UPDATED: &str = "Member updated successfully";
pub const MEMBER_DELETED: &str = "Member deleted successfully";

/// Body of every successful mutation response.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MutationResponse {
    pub message: String,
    /// The backend's acknowledgement, untouched.
    pub response: Ack,
}

impl MutationResponse {
    fn new(message: &str, response: Ack) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
            response,
        })
    }
}

pub(crate) async fn add_member(
    State(state): State<AppState>,
    Json(member): Json<Member>,
) -> ApiResult<Json<MutationResponse>> {
    let id = member.id;
    let ack = state.dispatcher().emit(Mutation::Add(member)).await?;
    info!("Member {} added", id);
    Ok(MutationResponse::new(MEMBER_ADDED, ack))
}

/// The body is authoritative: its `id` is what gets recorded and keyed on.
pub(crate) async fn update_member(
    State(state): State<AppState>,
    Path(member_id): Path<MemberId>,
    Json(member): Json<Member>,
) -> ApiResult<Json<MutationResponse>> {
    if member.id != member_id {
        warn!(
            "Update path names member {} but body carries member {}",
            member_id, member.id
        );
    }
    let id = member.id;
    let ack = state.dispatcher().emit(Mutation::Update(member)).await?;
    info!("Member {} updated", id);
    Ok(MutationResponse::new(MEMBER_UPDATED, ack))
}

pub(crate) async fn delete_member(
    State(state): State<AppState>,
    Path(member_id): Path<MemberId>,
) -> ApiResult<Json<MutationResponse>> {
    let ack = state
        .dispatcher()
        .emit(Mutation::Delete { id: member_id })
        .await?;
    info!("Member {} deleted", member_id);
    Ok(MutationResponse::new(MEMBER_DELETED, ack))
}
