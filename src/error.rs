use std::io;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // Request validation errors (the message is returned to the client verbatim)
    #[error("{0}")]
    InvalidArgument(String),

    #[error("invalid name `{0}`")]
    InvalidName(String),

    // Document lifecycle errors
    #[error("task document for `{0}` already exists")]
    DocumentExists(String),

    #[error("no task document for `{0}`")]
    DocumentNotFound(String),

    #[error("task {0} not found")]
    TaskNotFound(u64),

    #[error("file `{0}` not found")]
    FileNotFound(String),

    // Internal errors
    #[error("multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("axum error: {0}")]
    Axum(#[from] axum::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Generating response for AppError: {:?}", self);

        let (status_code, message) = match &self {
            Self::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::InvalidName(name) => (StatusCode::BAD_REQUEST, format!("Invalid name: {name}")),
            Self::DocumentExists(_) => {
                (StatusCode::BAD_REQUEST, "Blob already exists".to_string())
            }
            Self::DocumentNotFound(_) => (
                StatusCode::NOT_FOUND,
                "No tasks found for this user".to_string(),
            ),
            Self::TaskNotFound(_) => (StatusCode::NOT_FOUND, "Task not found".to_string()),
            Self::FileNotFound(_) => (StatusCode::NOT_FOUND, "File not found".to_string()),
            Self::Multipart(_) => (
                StatusCode::BAD_REQUEST,
                "Malformed multipart body".to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error occurred".to_string(),
            ),
        };

        (status_code, Json(json!({ "message": message }))).into_response()
    }
}
