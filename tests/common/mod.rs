//! Common test utilities
//!
//! Tests run against the live database at DATABASE_URL, which must have the
//! schema from migrations/ applied. Every test registers its own users with
//! fresh random emails; ownership scoping keeps tests isolated from each
//! other and from leftover rows, so no truncation is needed.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::util::ServiceExt;
use uuid::Uuid;

use fin_tracker::{api, AppState, Config};

/// Connect to the test database
pub async fn setup_test_db() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");

    PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB")
}

/// Build the full router with a fixed test signing secret
pub fn test_app(pool: PgPool) -> Router {
    let config = Config {
        database_url: String::new(),
        database_max_connections: 5,
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        jwt_secret: "integration-test-secret".to_string(),
        token_ttl_hours: 24,
    };

    api::create_router(AppState::new(pool, config))
}

/// A unique email so tests never collide on the unique constraint
pub fn unique_email(prefix: &str) -> String {
    format!("{}+{}@example.com", prefix, Uuid::new_v4())
}

/// Register a user and return (token, response body)
pub async fn register_user(app: &Router, name: &str, email: &str) -> (String, Value) {
    let body = send_json(
        app,
        "POST",
        "/users/register",
        None,
        Some(serde_json::json!({
            "name": name,
            "email": email,
            "password": "s3cret-pa55!"
        })),
        StatusCode::CREATED,
    )
    .await;

    let token = body["token"].as_str().expect("token in response").to_string();
    (token, body)
}

/// Send a request and assert the response status, returning the parsed body
pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
    expected: StatusCode,
) -> Value {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    let request = builder
        .body(match body {
            Some(json) => Body::from(json.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(
        status,
        expected,
        "{} {} returned {}: {}",
        method,
        uri,
        status,
        String::from_utf8_lossy(&bytes)
    );

    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    }
}
