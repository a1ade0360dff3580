#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use movieflix_core::catalog::{CatalogConfig, CatalogService};
use movieflix_core::memory::InMemoryMovieStore;
use tower::ServiceExt;

use movieflix_api::config::ServerConfig;
use movieflix_api::router::build_app_router;
use movieflix_api::state::AppState;

pub const BASE_URL: &str = "http://localhost:3000";

const BOUNDARY: &str = "movieflix-test-boundary";

/// A router over an in-memory record store and a temporary poster directory.
///
/// The temporary directory lives as long as this value.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryMovieStore>,
    pub poster_dir: PathBuf,
    _dir: tempfile::TempDir,
}

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(poster_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: 1024 * 1024,
        catalog: CatalogConfig {
            poster_dir,
            base_url: BASE_URL.to_string(),
        },
    }
}

/// Build the full application router with all middleware layers, exactly
/// as `main.rs` does, but over an in-memory store.
pub fn build_test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let poster_dir = dir.path().join("posters");
    std::fs::create_dir_all(&poster_dir).unwrap();

    let config = test_config(poster_dir.clone());
    let store = Arc::new(InMemoryMovieStore::new());
    let catalog = CatalogService::new(store.clone(), &config.catalog);
    let state = AppState {
        catalog: Arc::new(catalog),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        poster_dir,
        _dir: dir,
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn get(app: &TestApp, uri: &str) -> Response {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: &TestApp, uri: &str) -> Response {
    send(app, Request::delete(uri).body(Body::empty()).unwrap()).await
}

pub async fn send(app: &TestApp, request: Request<Body>) -> Response {
    app.router.clone().oneshot(request).await.unwrap()
}

/// One part of a `multipart/form-data` body.
pub enum Part<'a> {
    File {
        name: &'a str,
        file_name: &'a str,
        bytes: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

pub async fn multipart(app: &TestApp, method: Method, uri: &str, parts: &[Part<'_>]) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    send(app, request).await
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::File {
                name,
                file_name,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

// ---------------------------------------------------------------------------
// Movie helpers
// ---------------------------------------------------------------------------

pub fn movie_json(title: &str, year: i32) -> String {
    serde_json::json!({
        "title": title,
        "director": "Denis Villeneuve",
        "studio": "Legendary",
        "movieCast": ["Timothée Chalamet", "Zendaya"],
        "releaseYear": year,
    })
    .to_string()
}

/// POST a movie with a poster named `file_name`.
pub async fn add_movie(app: &TestApp, title: &str, year: i32, file_name: &str) -> Response {
    let details = movie_json(title, year);
    multipart(
        app,
        Method::POST,
        "/api/v1/movie/add-movie",
        &[
            Part::Text {
                name: "movieDto",
                value: &details,
            },
            Part::File {
                name: "file",
                file_name,
                bytes: b"poster-bytes",
            },
        ],
    )
    .await
}

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
