use std::collections::BTreeMap;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use validator::ValidationErrors;

use crate::models::common::ErrorResponse;

/// Faults raised by a [`crate::db::players::PlayerStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Player {0} does not exist")]
    MissingPlayer(i32),

    #[error("Invalid record: {0}")]
    Invalid(#[from] ValidationErrors),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Error type returned by the HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Player with id {0} not found")]
    NotFound(i32),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation(errors) => {
                ErrorResponse::new("VALIDATION_ERROR", self.to_string())
                    .with_fields(field_messages(errors))
            }
            ApiError::BadRequest(msg) => ErrorResponse::new("BAD_REQUEST", msg.clone()),
            ApiError::NotFound(_) => ErrorResponse::new("NOT_FOUND", self.to_string()),
            ApiError::Storage(err) => {
                // Raw store errors stay in the logs
                tracing::error!(error = %err, "Storage error");
                ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred")
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => e.code.to_string(),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}
