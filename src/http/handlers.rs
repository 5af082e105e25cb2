//! Axum HTTP handlers for the web server
//!
//! One handler per endpoint, each a single store call translated into a response.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::domain::{
    payloads::{CreateMessage, UpdateMessage},
    Message,
};
use crate::errors::AppError;
use crate::http::extractors::{JsonObject, MessageId};
use crate::http::response::PrettyJson;
use crate::AppState;

const CREATE_FAILED: &str = "Failed to create message";

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: &'static str,
}

pub async fn index() -> Html<&'static str> {
    Html("<h1>Chatterbox API</h1>")
}

pub async fn list_messages(
    State(state): State<AppState>,
) -> Result<PrettyJson<Vec<Message>>, AppError> {
    let messages = state.store.list().await?;
    Ok(PrettyJson(messages))
}

pub async fn create_message(
    State(state): State<AppState>,
    JsonObject(payload): JsonObject<CreateMessage>,
) -> Result<Response, AppError> {
    match state.store.create(payload.body, payload.username).await {
        Ok(message) => Ok((StatusCode::CREATED, PrettyJson(message)).into_response()),
        Err(err) => {
            error!(error = %err, "failed to create message");
            if state.expose_store_errors {
                Err(AppError::bad_request(err.to_string()))
            } else {
                Err(AppError::bad_request(CREATE_FAILED))
            }
        }
    }
}

pub async fn get_message(
    State(state): State<AppState>,
    MessageId(id): MessageId,
) -> Result<PrettyJson<Message>, AppError> {
    let message = state.store.get(id).await?;
    Ok(PrettyJson(message))
}

pub async fn update_message(
    State(state): State<AppState>,
    MessageId(id): MessageId,
    payload: Result<JsonObject<UpdateMessage>, AppError>,
) -> Result<PrettyJson<Message>, AppError> {
    // Unknown ids are reported before body problems.
    let JsonObject(payload) = match payload {
        Ok(payload) => payload,
        Err(err) => {
            state.store.get(id).await?;
            return Err(err);
        }
    };

    let message = match payload.body {
        Some(body) => state.store.update_body(id, body).await?,
        None => state.store.get(id).await?,
    };
    Ok(PrettyJson(message))
}

pub async fn delete_message(
    State(state): State<AppState>,
    MessageId(id): MessageId,
) -> Result<PrettyJson<DeletedResponse>, AppError> {
    state.store.delete(id).await?;
    Ok(PrettyJson(DeletedResponse {
        message: "Message deleted",
    }))
}
