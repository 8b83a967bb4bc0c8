use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use super::models::{ErrorResponse, StorageErrorResponse};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Name is required")]
    NameRequired,
    #[error("invalid capybara id")]
    InvalidId,
    #[error("Capybara not found")]
    NotFound,
    #[error("{0}")]
    Storage(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Storage(format!("{err:#}"))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NameRequired | ApiError::InvalidId => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Storage(message) => {
                log::error!("Storage failure: {}", message);
                (status, Json(StorageErrorResponse { error: message })).into_response()
            }
            other => (
                status,
                Json(ErrorResponse {
                    message: other.to_string(),
                }),
            )
                .into_response(),
        }
    }
}
