use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tavola_core::{
    error::StoreError,
    validate::{FieldError, ValidationError},
};
use thiserror::Error;
use tracing::error;

use crate::config::ConfigError;

/// Errors a request handler can end with.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let kind = match rejection {
            JsonRejection::JsonDataError(_) => "type_error",
            JsonRejection::MissingJsonContentType(_) => "content_type",
            _ => "json_invalid",
        };

        AppError::Validation(ValidationError::new(vec![FieldError::body(
            kind,
            rejection.body_text(),
        )]))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": err.errors })),
            )
                .into_response(),
            AppError::Storage(err) => {
                error!("Storage failure: {err}");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": err.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

/// Errors that stop the server process.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(std::io::Error),
}
