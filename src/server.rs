//! HTTP API for the index service.
//!
//! Endpoints:
//! - `POST /indexes` with `{"name": "..."}` creates an index (201, 409 on a
//!   name collision, 400 on a bad payload or name, 500 otherwise)
//! - `GET /` answers a liveness probe
//!
//! Failure causes behind a 500 are logged and never returned to the client.

use crate::error::StorageError;
use crate::index::IndexCatalog;
use crate::Config;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Application state shared across handlers
///
/// No endpoint reads or writes pages yet, so the server holds no index
/// handles: each store is closed as soon as its index is created.
pub struct AppState {
    catalog: IndexCatalog,
}

impl AppState {
    /// Create state over the configured storage root
    pub fn new(config: &Config) -> Self {
        Self {
            catalog: config.catalog(),
        }
    }

    /// The catalog indexes are created in
    pub fn catalog(&self) -> &IndexCatalog {
        &self.catalog
    }
}

pub type SharedState = Arc<AppState>;

/// Request to create an index
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateIndexRequest {
    pub name: String,
}

/// Response for successful operations
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    pub status: String,
}

type ApiError = (StatusCode, &'static str);

/// Build the router with all endpoints
pub fn build_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/indexes", post(create_index))
        .layer(cors)
        .with_state(state)
}

/// Bind the configured address and serve until the process is stopped
pub async fn serve(config: Config) -> crate::Result<()> {
    if config.create_data_dir {
        config.catalog().ensure_root()?;
    }

    let state = Arc::new(AppState::new(&config));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr.as_str()).await?;
    log::info!(
        "server listening on {} with storage root {}",
        listener.local_addr()?,
        config.data_dir.display()
    );
    axum::serve(listener, app).await?;
    Ok(())
}

async fn root() -> &'static str {
    "evergreen"
}

async fn create_index(
    State(state): State<SharedState>,
    payload: Result<Json<CreateIndexRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        log::debug!("rejected create index payload: {}", rejection);
        (StatusCode::BAD_REQUEST, "Invalid request payload")
    })?;

    let name = req.name;
    let created = tokio::task::spawn_blocking({
        let state = state.clone();
        let name = name.clone();
        move || state.catalog.create_index(&name).map(|store| store.close())
    })
    .await;

    match created {
        Ok(Ok(())) => {
            log::info!("index {} created", name);
            Ok((
                StatusCode::CREATED,
                Json(StatusResponse {
                    status: "index created".to_string(),
                }),
            ))
        }
        Ok(Err(StorageError::IndexAlreadyExists(_))) => {
            Err((StatusCode::CONFLICT, "Index already exists"))
        }
        Ok(Err(StorageError::InvalidIndexName { name, reason })) => {
            log::debug!("rejected index name {:?}: {}", name, reason);
            Err((StatusCode::BAD_REQUEST, "Invalid index name"))
        }
        Ok(Err(e)) => {
            log::error!("Failed to create index {}: {}", name, e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Failed to create index"))
        }
        Err(e) => {
            log::error!("Failed to create index {}: task failed: {}", name, e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Failed to create index"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use tempfile::{tempdir, TempDir};
    use tower::ServiceExt;

    fn test_state() -> (TempDir, SharedState) {
        let dir = tempdir().unwrap();
        let state = Arc::new(AppState::new(&Config::new(dir.path())));
        (dir, state)
    }

    fn create_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/indexes")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(state: &SharedState, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = build_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_create_then_conflict() {
        let (dir, state) = test_state();

        let (status, body) = send(&state, create_request(r#"{"name":"catalog"}"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        let parsed: StatusResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed.status, "index created");
        assert!(dir.path().join("catalog").is_file());

        let (status, _) = send(&state, create_request(r#"{"name":"catalog"}"#)).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_unknown_fields_rejected() {
        let (dir, state) = test_state();

        let (status, _) = send(
            &state,
            create_request(r#"{"name":"catalog","pages":10}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!dir.path().join("catalog").exists());
    }

    #[tokio::test]
    async fn test_malformed_payload_rejected() {
        let (_dir, state) = test_state();

        for body in ["not json", "{}", r#"{"name": 5}"#] {
            let (status, _) = send(&state, create_request(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
        }
    }

    #[tokio::test]
    async fn test_invalid_name_rejected() {
        let (_dir, state) = test_state();

        let (status, _) = send(&state, create_request(r#"{"name":"../escape"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_root_is_server_error() {
        let dir = tempdir().unwrap();
        let config = Config::new(dir.path().join("missing"));
        let state = Arc::new(AppState::new(&config));

        let (status, body) = send(&state, create_request(r#"{"name":"catalog"}"#)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, b"Failed to create index");
    }

    #[tokio::test]
    async fn test_wrong_method() {
        let (_dir, state) = test_state();

        let request = Request::builder()
            .method("GET")
            .uri("/indexes")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&state, request).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_root() {
        let (_dir, state) = test_state();

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let (status, body) = send(&state, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"evergreen");
    }

    #[cfg(target_os = "linux")]
    fn open_fds_under(dir: &std::path::Path) -> usize {
        std::fs::read_dir("/proc/self/fd")
            .unwrap()
            .filter_map(|entry| std::fs::read_link(entry.ok()?.path()).ok())
            .filter(|target| target.starts_with(dir))
            .count()
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_created_indexes_are_not_held_open() {
        let (dir, state) = test_state();
        let root = dir.path().canonicalize().unwrap();

        for i in 0..32 {
            let body = format!(r#"{{"name":"idx{i}"}}"#);
            let (status, _) = send(&state, create_request(&body)).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        assert_eq!(state.catalog().list_indexes().unwrap().len(), 32);
        assert_eq!(open_fds_under(&root), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_one_wins() {
        let (dir, state) = test_state();

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let state = state.clone();
            tasks.push(tokio::spawn(async move {
                send(&state, create_request(r#"{"name":"catalog"}"#)).await.0
            }));
        }

        let mut created = 0;
        let mut conflicts = 0;
        for task in tasks {
            match task.await.unwrap() {
                StatusCode::CREATED => created += 1,
                StatusCode::CONFLICT => conflicts += 1,
                other => panic!("unexpected status {other}"),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(conflicts, 7);
        assert_eq!(std::fs::metadata(dir.path().join("catalog")).unwrap().len(), 0);
    }
}
