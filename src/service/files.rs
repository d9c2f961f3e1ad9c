use std::io;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{Response, StatusCode, header};
use axum::response::IntoResponse;

use crate::error::AppError;
use crate::utils::state::AppState;
use crate::utils::validation::is_valid_file_name;

/// GET /files/<name>
///
/// Serves a stored upload back under the flat name it was stored with;
/// this is what a task's `file_url` resolves to.
pub async fn get_file_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !is_valid_file_name(&name) {
        return Err(AppError::InvalidName(name));
    }

    let data = match state.store.get(&name).await {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(AppError::FileNotFound(name));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api;
    use crate::config::Config;
    use axum::Router;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> (Router, Arc<AppState>) {
        let state = Arc::new(AppState::new(Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            storage_typ: "MEMORY".to_string(),
            root_dir: String::new(),
            public_url: "http://127.0.0.1:8080".to_string(),
        }));
        (api::create_router(state.clone()), state)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn stored_files_are_served_as_octet_streams() {
        let (app, state) = app();
        state.store.put("photo.png", b"pixels", true).await.unwrap();

        let response = app.oneshot(get_request("/files/photo.png")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/octet-stream"
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"pixels");
    }

    #[tokio::test]
    async fn missing_files_are_not_found() {
        let (app, _) = app();

        let response = app.oneshot(get_request("/files/ghost.png")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "File not found");
    }

    #[tokio::test]
    async fn encoded_traversal_names_are_rejected() {
        let (app, _) = app();

        let response = app
            .oneshot(get_request("/files/..%2Fpasswd"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
