//! HTTP API for memberstream.
//!
//! Each member mutation is translated into one event and dispatched to the
//! configured stream. No member state is kept here.

mod error;
mod members;

use std::sync::Arc;
use axum::{
    extract::State,
    response::Json,
    routing::{get, post, put},
    Router,
};
use memberstream_stream::{BackendMode, Dispatcher};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::{ApiError, ApiResult, ErrorBody};
pub use members::{
    MutationResponse, MEMBER_ADDED, MEMBER_DELETED, MEMBER_UPDATED,
};

/// Public description of the active backend. Never includes credentials.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackendInfo {
    pub mode: BackendMode,
    pub stream_name: String,
    pub region: Option<String>,
}

/// Shared, read-only state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    dispatcher: Arc<Dispatcher>,
    backend: Arc<BackendInfo>,
}

impl AppState {
    pub fn new(dispatcher: Arc<Dispatcher>, region: Option<String>) -> Self {
        let backend = BackendInfo {
            mode: dispatcher.mode(),
            stream_name: dispatcher.stream_name().to_string(),
            region,
        };
        Self {
            dispatcher,
            backend: Arc::new(backend),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

async fn config_handler(State(state): State<AppState>) -> Json<BackendInfo> {
    Json((*state.backend).clone())
}

/// Build the HTTP API router with the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/members/", post(members::add_member))
        .route(
            "/members/{member_id}",
            put(members::update_member).delete(members::delete_member),
        )
        .route("/config", get(config_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
