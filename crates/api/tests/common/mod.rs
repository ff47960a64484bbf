//! Shared helpers for HTTP-level integration tests.
//!
//! Each test binary compiles this module separately, so not every helper is
//! used everywhere.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use fiszki_api::auth::jwt::JwtConfig;
use fiszki_api::config::ServerConfig;
use fiszki_api::mailer::Mailer;
use fiszki_api::ratelimit::RateLimiter;
use fiszki_api::router::build_app_router;
use fiszki_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// The generation rate limiter gets a generous budget so unrelated tests
/// never trip it; rate-limit tests override it via
/// [`build_test_app_with_config`].
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:4321".to_string()],
        request_timeout_secs: 30,
        generation_rate_per_min: 1000.0,
        generation_burst: 1000.0,
        jwt: JwtConfig {
            secret: "test-secret-key-for-integration-tests".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
            reset_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This goes through `build_app_router` so integration tests exercise the
/// same middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses. The mailer is disabled: reset emails are
/// logged, never sent.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_config(pool, test_config())
}

/// Same as [`build_test_app`] but with a caller-supplied configuration.
pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let rate_limiter = Arc::new(RateLimiter::per_minute(
        config.generation_rate_per_min,
        config.generation_burst,
    ));
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        rate_limiter,
        mailer: Arc::new(Mailer::disabled()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request without authentication.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body, without authentication.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and a bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a PATCH request with a JSON body and a bearer token.
pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PATCH)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a DELETE request with a bearer token.
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body must be valid JSON")
}

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

/// Register a user via the API and log them in, returning
/// `(access_token, user_id)`.
pub async fn register_and_login(app: &Router, email: &str) -> (String, i64) {
    let password = "correct-horse-battery";
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app.clone(), "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let token = json["access_token"].as_str().unwrap().to_string();
    let user_id = json["user"]["id"].as_i64().unwrap();
    (token, user_id)
}

/// Create a deck through the API and return its id.
pub async fn create_deck(app: &Router, token: &str, name: &str) -> i64 {
    let body = serde_json::json!({ "name": name });
    let response = post_json_auth(app.clone(), "/api/v1/decks", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a flashcard in a deck through the API and return its id.
pub async fn create_flashcard(app: &Router, token: &str, deck_id: i64, front: &str) -> i64 {
    let body = serde_json::json!({ "front": front, "back": "definition" });
    let uri = format!("/api/v1/decks/{deck_id}/flashcards");
    let response = post_json_auth(app.clone(), &uri, token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
