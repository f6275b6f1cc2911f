use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// The only failure reported to callers with a message of its own.
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    DataSource(#[from] db::Error),
    #[error("Failed to format date: {0}")]
    DateFormat(#[from] time::error::Format),
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(ErrorBody { error: message })).into_response()
            }
            err => {
                error!("error handling request: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
        }
    }
}
