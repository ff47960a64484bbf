//! Integration tests for the `/domains` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth, register_and_login};
use sqlx::PgPool;

/// Creating a new domain returns 201 with the row.
#[sqlx::test(migrations = "../../migrations")]
async fn test_create_domain(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, user_id) = register_and_login(&app, "dom@test.com").await;

    let body = serde_json::json!({ "name": "Spanish" });
    let response = post_json_auth(app, "/api/v1/domains", &token, body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Spanish");
    assert_eq!(json["user_id"], user_id);
}

/// Re-creating a domain by the same name is idempotent: 200 with the same
/// row, no duplicate.
#[sqlx::test(migrations = "../../migrations")]
async fn test_create_domain_idempotent(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_and_login(&app, "idem@test.com").await;

    let body = serde_json::json!({ "name": "Biology" });
    let response = post_json_auth(app.clone(), "/api/v1/domains", &token, body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let first = body_json(response).await;

    let response = post_json_auth(app.clone(), "/api/v1/domains", &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let second = body_json(response).await;
    assert_eq!(first["id"], second["id"]);

    let response = get_auth(app, "/api/v1/domains", &token).await;
    let list = body_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

/// The same name is allowed for different users.
#[sqlx::test(migrations = "../../migrations")]
async fn test_domain_name_scoped_per_user(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token_a, _) = register_and_login(&app, "a@test.com").await;
    let (token_b, _) = register_and_login(&app, "b@test.com").await;

    let body = serde_json::json!({ "name": "History" });
    let response = post_json_auth(app.clone(), "/api/v1/domains", &token_a, body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(app, "/api/v1/domains", &token_b, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

/// Names are trimmed and length-checked: under 2 or over 100 characters is
/// a 400.
#[sqlx::test(migrations = "../../migrations")]
async fn test_domain_name_validation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_and_login(&app, "val@test.com").await;

    let body = serde_json::json!({ "name": "  x  " });
    let response = post_json_auth(app.clone(), "/api/v1/domains", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = serde_json::json!({ "name": "x".repeat(101) });
    let response = post_json_auth(app, "/api/v1/domains", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Listing returns only the caller's domains, newest first.
#[sqlx::test(migrations = "../../migrations")]
async fn test_list_domains_scoped_and_ordered(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_and_login(&app, "mine@test.com").await;
    let (other_token, _) = register_and_login(&app, "other@test.com").await;

    for name in ["First", "Second"] {
        let body = serde_json::json!({ "name": name });
        post_json_auth(app.clone(), "/api/v1/domains", &token, body).await;
    }
    let body = serde_json::json!({ "name": "Foreign" });
    post_json_auth(app.clone(), "/api/v1/domains", &other_token, body).await;

    let response = get_auth(app, "/api/v1/domains", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    let names: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Second", "First"]);
}
