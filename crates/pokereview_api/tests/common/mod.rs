#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pokereview_api::{router, ApiConfig};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Router over a fresh database file that lives as long as the harness.
pub struct TestApp {
    pub app: Router,
    _dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = ApiConfig {
            db_path: dir.path().join("pokereview.sqlite3"),
        };
        Self {
            app: router(config),
            _dir: dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self
            .send(Request::get(uri).body(Body::empty()).unwrap())
            .await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    pub async fn post(&self, uri: &str, payload: Value) -> (StatusCode, String) {
        self.write("POST", uri, payload).await
    }

    pub async fn put(&self, uri: &str, payload: Value) -> (StatusCode, String) {
        self.write("PUT", uri, payload).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, String) {
        let (status, body) = self
            .send(Request::delete(uri).body(Body::empty()).unwrap())
            .await;
        (status, String::from_utf8(body).unwrap())
    }

    async fn write(&self, method: &str, uri: &str, payload: Value) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();
        let (status, body) = self.send(request).await;
        (status, String::from_utf8(body).unwrap())
    }
}

pub fn errors_of(body: &str) -> Vec<String> {
    let value: Value = serde_json::from_str(body).unwrap();
    value["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item.as_str().unwrap().to_string())
        .collect()
}

/// Seeds country 1, owner 1, category 1 and pokemon 1.
pub async fn seed_pokemon(app: &TestApp) {
    let (status, _) = app.post("/api/country", serde_json::json!({"name": "Kanto"})).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .post(
            "/api/owner?countryId=1",
            serde_json::json!({"firstName": "Ash", "lastName": "Ketchum", "gym": "Pallet"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .post("/api/category", serde_json::json!({"name": "Electric"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .post(
            "/api/pokemon?ownerId=1&catId=1",
            serde_json::json!({"name": "Pikachu", "birthDate": "1996-02-27T00:00:00"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}
