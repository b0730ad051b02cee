//! Maps stream failures onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use memberstream_stream::StreamError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Body of every failed mutation response.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ErrorBody {
    pub detail: String,
}

/// An error returned from a handler.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = self.to_string();
        error!("Request failed: {}", detail);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody { detail }),
        )
            .into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
