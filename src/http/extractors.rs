//! Request extractors with JSON error rejections

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::AppError;

/// Message id from the `{id}` path segment.
///
/// Anything that is not an integer cannot name a message, so it is
/// rejected as not found rather than as a bad request.
#[derive(Debug, Clone, Copy)]
pub struct MessageId(pub i64);

impl<S> FromRequestParts<S> for MessageId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::message_not_found())?;
        Ok(Self(id))
    }
}

/// JSON object body decoded into `T`.
///
/// The content type is not checked. Empty bodies, invalid JSON, non-object
/// payloads and mistyped fields are all rejected with a 400.
#[derive(Debug)]
pub struct JsonObject<T>(pub T);

impl<S, T> FromRequest<S> for JsonObject<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|err| AppError::bad_request(format!("failed to read request body: {err}")))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(AppError::bad_request("request body must be a JSON object"));
        }

        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|err| AppError::bad_request(format!("invalid JSON body: {err}")))?;
        if !value.is_object() {
            return Err(AppError::bad_request("request body must be a JSON object"));
        }

        let payload = serde_json::from_value(value)
            .map_err(|err| AppError::bad_request(format!("invalid request body: {err}")))?;
        Ok(Self(payload))
    }
}
