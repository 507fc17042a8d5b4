//! Test helpers: stub person registry, token minting, in-process app.

#![allow(dead_code)]

use axum::{
    body::Body,
    extract::Path,
    http::{HeaderMap, Request, StatusCode},
    routing::get,
    Json, Router,
};
use chrono::{Duration, Utc};
use health_service::config::{
    AuthSettings, PersonServiceSettings, ServerSettings, Settings, StoreSettings,
};
use health_service::models::Person;
use health_service::services::jwt::Claims;
use health_service::startup::build_router;
use health_service::AppState;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::Secret;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "test-secret";

pub struct TestApp {
    pub router: Router,
    pub data_file: PathBuf,
    _data_dir: TempDir,
}

pub fn person(id: i64, name: &str) -> Person {
    Person {
        id,
        name: name.to_string(),
    }
}

fn has_bearer(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("Bearer "))
        .unwrap_or(false)
}

/// Spawn a stub person registry on an ephemeral local port and return its
/// base URL. Like the real registry it rejects requests without a bearer
/// header, so these tests also cover that the service forwards the caller's
/// `Authorization` downstream.
pub async fn spawn_registry(persons: Vec<Person>) -> String {
    let persons = Arc::new(persons);

    let persons_for_list = persons.clone();
    let persons_for_get = persons.clone();

    let app = Router::new()
        .route(
            "/persons",
            get(move |headers: HeaderMap| {
                let persons = persons_for_list.clone();
                async move {
                    if !has_bearer(&headers) {
                        return Err(StatusCode::UNAUTHORIZED);
                    }
                    Ok(Json(persons.as_ref().clone()))
                }
            }),
        )
        .route(
            "/persons/:id",
            get(move |headers: HeaderMap, Path(id): Path<i64>| {
                let persons = persons_for_get.clone();
                async move {
                    if !has_bearer(&headers) {
                        return StatusCode::UNAUTHORIZED;
                    }
                    if persons.iter().any(|p| p.id == id) {
                        StatusCode::OK
                    } else {
                        StatusCode::NOT_FOUND
                    }
                }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub registry");
    let addr = listener.local_addr().expect("Failed to read registry addr");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Stub registry crashed");
    });

    format!("http://{}", addr)
}

/// A base URL where nothing listens, for unreachable-registry tests.
pub async fn unreachable_registry_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to read addr");
    drop(listener);

    format!("http://{}", addr)
}

pub fn spawn_app(registry_url: String) -> TestApp {
    let data_dir = TempDir::new().expect("Failed to create temp dir");
    let data_file = data_dir.path().join("data.json");

    let settings = Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        auth: AuthSettings {
            secret: Secret::new(TEST_SECRET.to_string()),
        },
        person_service: PersonServiceSettings {
            url: registry_url,
            request_timeout_secs: 1,
        },
        store: StoreSettings {
            data_file: data_file.clone(),
        },
    };

    TestApp {
        router: build_router(AppState::new(&settings)),
        data_file,
        _data_dir: data_dir,
    }
}

pub fn token_with_expiry(secret: &str, expires_in: Duration) -> String {
    let claims = Claims {
        sub: "admin".to_string(),
        exp: (Utc::now() + expires_in).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to encode token")
}

pub fn valid_token() -> String {
    token_with_expiry(TEST_SECRET, Duration::hours(2))
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    }
}

/// Run a request through the router, returning status and parsed JSON body
/// (`Value::Null` for empty bodies).
pub async fn send(app: &TestApp, req: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .router
        .clone()
        .oneshot(req)
        .await
        .expect("Request failed");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Body was not valid JSON")
    };

    (status, json)
}
