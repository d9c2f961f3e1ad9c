use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::service::files::get_file_handler;
use crate::service::tasks::{add_task, check_blob, create_blob, list_tasks, mark_task_completed};
use crate::utils::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(task_router())
        .route("/files/{name}", get(get_file_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn task_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/check_blob", get(check_blob))
        .route("/create_blob", post(create_blob))
        .route("/add_task", post(add_task))
        .route("/list_tasks", get(list_tasks))
        .route("/mark_task_completed", post(mark_task_completed))
}
