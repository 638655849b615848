#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use marquee::config::Config;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower::ServiceExt;

pub const API_KEY: &str = "test-key";
pub const MAX_IMAGE_BYTES: usize = 4096;
const BOUNDARY: &str = "marquee-test-boundary";

pub struct TestApp {
    pub state: Arc<marquee::api::AppState>,
    pub router: Router,
    pub dir: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

pub struct ImageFile<'a> {
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub bytes: Vec<u8>,
}

impl<'a> ImageFile<'a> {
    pub fn png(file_name: &'a str) -> Self {
        Self {
            file_name,
            content_type: "image/png",
            bytes: b"\x89PNG\r\n\x1a\nfake".to_vec(),
        }
    }
}

pub async fn spawn_app() -> TestApp {
    let dir = std::env::temp_dir().join(format!("marquee-test-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("failed to create test dir");

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", dir.join("catalog.db").display());
    config.server.api_key = API_KEY.to_string();
    config.uploads.root = dir.join("uploads").display().to_string();
    config.uploads.max_image_bytes = MAX_IMAGE_BYTES;

    let state = marquee::api::create_app_state_from_config(config, None)
        .await
        .expect("failed to create app state");
    let router = marquee::api::router(state.clone());

    TestApp { state, router, dir }
}

impl TestApp {
    pub fn uploads(&self, kind_dir: &str) -> PathBuf {
        self.dir.join("uploads").join(kind_dir)
    }

    /// Files currently stored for a kind of entity.
    pub fn stored_files(&self, kind_dir: &str) -> Vec<String> {
        std::fs::read_dir(self.uploads(kind_dir))
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn image_exists(&self, kind_dir: &str, name: &str) -> bool {
        Path::new(&self.uploads(kind_dir)).join(name).exists()
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn send_json(&self, method: &str, uri: &str, body: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("X-Api-Key", API_KEY)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send_json("POST", uri, body).await
    }

    pub async fn patch_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send_json("PATCH", uri, body).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("DELETE")
            .uri(uri)
            .header("X-Api-Key", API_KEY)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn send_multipart(
        &self,
        method: &str,
        uri: &str,
        fields: &[(&str, &str)],
        image: Option<ImageFile<'_>>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("X-Api-Key", API_KEY)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(fields, image)))
            .unwrap();
        self.send(request).await
    }

    /// Creates a movie over JSON and returns its id.
    pub async fn create_movie(&self, body: Value) -> i64 {
        let (status, json) = self.post_json("/movies", &body).await;
        assert_eq!(status, StatusCode::CREATED, "create movie failed: {json}");
        json["data"]["id"].as_i64().unwrap()
    }

    pub async fn create_character(&self, name: &str, age: i32) -> i64 {
        let body = serde_json::json!({ "name": name, "age": age, "weight": 70.5 });
        let (status, json) = self.post_json("/characters", &body).await;
        assert_eq!(status, StatusCode::CREATED, "create character failed: {json}");
        json["data"]["id"].as_i64().unwrap()
    }

    pub async fn create_genre(&self, name: &str) -> i64 {
        let body = serde_json::json!({ "name": name });
        let (status, json) = self.post_json("/genres", &body).await;
        assert_eq!(status, StatusCode::CREATED, "create genre failed: {json}");
        json["data"]["id"].as_i64().unwrap()
    }
}

fn multipart_body(fields: &[(&str, &str)], image: Option<ImageFile<'_>>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(image) = image {
        body.extend_from_slice(
            format!(
                concat!(
                    "--{}\r\nContent-Disposition: form-data; name=\"image\"; ",
                    "filename=\"{}\"\r\nContent-Type: {}\r\n\r\n"
                ),
                BOUNDARY,
                image.file_name, image.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(&image.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Sorted ids of the objects in a JSON array.
pub fn ids(value: &Value) -> Vec<i64> {
    let mut ids: Vec<i64> = value
        .as_array()
        .map(|items| items.iter().filter_map(|i| i["id"].as_i64()).collect())
        .unwrap_or_default();
    ids.sort_unstable();
    ids
}
