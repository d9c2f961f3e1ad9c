use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{FromRequest, Multipart, Query, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::{Json, body};
use serde::{Deserialize, Serialize};

use crate::domain::task::{FileAttachment, Task};
use crate::error::AppError;
use crate::utils::state::AppState;
use crate::utils::validation::{is_valid_file_name, is_valid_username};

#[derive(Deserialize, Debug)]
pub struct CreateBlobReq {
    username: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct MarkTaskCompletedReq {
    username: Option<String>,
    task_id: Option<u64>,
}

/// Fields of an add request, collected from either a JSON body or a
/// multipart form with an optional `file` part.
#[derive(Default)]
struct AddTaskInput {
    username: Option<String>,
    text: Option<String>,
    file: Option<FileAttachment>,
}

#[derive(Deserialize, Default)]
struct AddTaskReq {
    username: Option<String>,
    text: Option<String>,
}

#[derive(Serialize)]
pub struct BlobExistsRes {
    exists: bool,
}

#[derive(Serialize)]
pub struct MessageRes {
    message: &'static str,
}

#[derive(Serialize)]
pub struct TaskListRes {
    tasks: Vec<Task>,
}

#[derive(Serialize)]
pub struct TaskActionRes {
    message: &'static str,
    task: Task,
}

/// GET /check_blob?username=
pub async fn check_blob(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let username = require(params.get("username").cloned(), "Username is required")?;
    if !is_valid_username(&username) {
        return Err(AppError::InvalidName(username));
    }

    let exists = state.tasks.exists(&username).await?;
    Ok((StatusCode::OK, Json(BlobExistsRes { exists })))
}

/// POST /create_blob
pub async fn create_blob(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBlobReq>,
) -> Result<impl IntoResponse, AppError> {
    let username = require(req.username, "Username is required")?;
    if !is_valid_username(&username) {
        return Err(AppError::InvalidName(username));
    }

    state.tasks.create(&username).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageRes {
            message: "Blob created successfully",
        }),
    ))
}

/// POST /add_task
///
/// Accepts a plain JSON body, or a multipart form when a file is attached.
pub async fn add_task(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<impl IntoResponse, AppError> {
    let input = if is_multipart(request.headers()) {
        multipart_input(request).await?
    } else {
        json_input(request).await?
    };

    let username = require(input.username, "Username is required")?;
    // Text only has to be present; an empty string is accepted.
    let text = input
        .text
        .ok_or_else(|| AppError::InvalidArgument("Text is required".to_string()))?;
    if !is_valid_username(&username) {
        return Err(AppError::InvalidName(username));
    }
    if let Some(file) = &input.file {
        if !is_valid_file_name(&file.name) {
            return Err(AppError::InvalidName(file.name.clone()));
        }
    }

    let task = state.tasks.append_task(&username, &text, input.file).await?;
    Ok((
        StatusCode::CREATED,
        Json(TaskActionRes {
            message: "Task added successfully",
            task,
        }),
    ))
}

/// GET /list_tasks?username=
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let username = require(params.get("username").cloned(), "Username is required")?;
    if !is_valid_username(&username) {
        return Err(AppError::InvalidName(username));
    }

    let tasks = state.tasks.load(&username).await?;
    Ok((StatusCode::OK, Json(TaskListRes { tasks })))
}

/// POST /mark_task_completed
pub async fn mark_task_completed(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MarkTaskCompletedReq>,
) -> Result<impl IntoResponse, AppError> {
    let (username, task_id) = match (req.username, req.task_id) {
        (Some(username), Some(task_id)) if !username.is_empty() => (username, task_id),
        _ => {
            return Err(AppError::InvalidArgument(
                "Username and task ID are required".to_string(),
            ));
        }
    };
    if !is_valid_username(&username) {
        return Err(AppError::InvalidName(username));
    }

    let task = state.tasks.complete_task(&username, task_id).await?;
    Ok((
        StatusCode::OK,
        Json(TaskActionRes {
            message: "Task marked as completed",
            task,
        }),
    ))
}

fn require(value: Option<String>, message: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::InvalidArgument(message.to_string()))
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"))
}

/// A body that does not parse as JSON counts as empty input and fails the
/// first required-field check.
async fn json_input(request: Request) -> Result<AddTaskInput, AppError> {
    let bytes = body::to_bytes(request.into_body(), usize::MAX).await?;
    let req: AddTaskReq = serde_json::from_slice(&bytes).unwrap_or_default();
    Ok(AddTaskInput {
        username: req.username,
        text: req.text,
        file: None,
    })
}

async fn multipart_input(request: Request) -> Result<AddTaskInput, AppError> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| AppError::InvalidArgument(e.body_text()))?;

    let mut input = AddTaskInput::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "username" => input.username = Some(field.text().await?),
            "text" => input.text = Some(field.text().await?),
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                input.file = Some(FileAttachment {
                    name: file_name,
                    data: data.to_vec(),
                });
            }
            _ => {}
        }
    }
    Ok(input)
}
