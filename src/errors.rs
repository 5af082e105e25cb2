use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::http::response::PrettyJson;
use crate::store::StoreError;

pub const MESSAGE_NOT_FOUND: &str = "Message not found";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {message}")]
    NotFound { message: &'static str },
    #[error("bad request: {message}")]
    BadRequest { message: String },
    #[error("internal error")]
    Internal { message: String },
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    pub fn message_not_found() -> Self {
        Self::NotFound {
            message: MESSAGE_NOT_FOUND,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::message_not_found(),
            StoreError::Database(err) => Self::internal(format!("storage failure: {err}")),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::NotFound { message } => (StatusCode::NOT_FOUND, message.to_string()),
            Self::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            Self::Internal { message } => {
                tracing::error!(error = %message, "request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, PrettyJson(ErrorResponse { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_maps_to_fixed_message() {
        let err = AppError::from(StoreError::NotFound { id: 3 });
        assert!(matches!(
            err,
            AppError::NotFound {
                message: MESSAGE_NOT_FOUND
            }
        ));
    }

    #[test]
    fn status_codes_follow_variant() {
        assert_eq!(
            AppError::message_not_found().into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::bad_request("nope").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(StoreError::Database(sqlx::Error::PoolTimedOut))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
