//! Integration tests for the `/generation-requests` endpoints: creation,
//! rate limiting, polling, and candidate acceptance.
//!
//! The worker does not run here; its database transitions are applied
//! directly through `GenerationRepo`.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_deck, get_auth, post_json_auth, register_and_login};
use sqlx::PgPool;

use fiszki_db::models::generation::CandidateCard;
use fiszki_db::repositories::GenerationRepo;

/// A source text that clears the 100-character minimum.
fn source_text() -> String {
    "The mitochondrion is a membrane-bound organelle found in most eukaryotic \
     cells, generating most of the cell's supply of ATP."
        .to_string()
}

async fn create_request(app: &axum::Router, token: &str) -> i64 {
    let body = serde_json::json!({ "source_text": source_text() });
    let response = post_json_auth(app.clone(), "/api/v1/generation-requests", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Complete a request with two candidates, as the worker would.
async fn complete_request(pool: &PgPool, request_id: i64) -> Vec<i64> {
    let cards = vec![
        CandidateCard {
            front: "What do mitochondria produce?".to_string(),
            back: "ATP".to_string(),
        },
        CandidateCard {
            front: "Where are mitochondria found?".to_string(),
            back: "In most eukaryotic cells".to_string(),
        },
    ];
    GenerationRepo::complete_with_candidates(pool, request_id, &cards)
        .await
        .expect("completion should succeed");
    GenerationRepo::candidates_for_request(pool, request_id)
        .await
        .expect("candidate fetch should succeed")
        .into_iter()
        .map(|c| c.id)
        .collect()
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_generation_request(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, user_id) = register_and_login(&app, "gen@test.com").await;

    let body = serde_json::json!({ "source_text": source_text() });
    let response = post_json_auth(app, "/api/v1/generation-requests", &token, body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "pending");
    assert_eq!(json["user_id"], user_id);
    assert!(json["error_message"].is_null());
}

/// Source text outside the 100..10000 character window is a 400.
#[sqlx::test(migrations = "../../migrations")]
async fn test_source_text_validation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_and_login(&app, "genval@test.com").await;

    let body = serde_json::json!({ "source_text": "too short" });
    let response = post_json_auth(app.clone(), "/api/v1/generation-requests", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = serde_json::json!({ "source_text": "x".repeat(10_001) });
    let response = post_json_auth(app, "/api/v1/generation-requests", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Exhausting the per-user budget returns 429 with the literal RATE_LIMIT
/// code, which clients match on.
#[sqlx::test(migrations = "../../migrations")]
async fn test_rate_limit_returns_429(pool: PgPool) {
    let mut config = common::test_config();
    config.generation_rate_per_min = 1.0;
    config.generation_burst = 2.0;
    let app = common::build_test_app_with_config(pool, config);
    let (token, _) = register_and_login(&app, "limited@test.com").await;
    let (other, _) = register_and_login(&app, "unlimited@test.com").await;

    create_request(&app, &token).await;
    create_request(&app, &token).await;

    let body = serde_json::json!({ "source_text": source_text() });
    let response = post_json_auth(app.clone(), "/api/v1/generation-requests", &token, body).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let json = body_json(response).await;
    assert_eq!(json["code"], "RATE_LIMIT");

    // The budget is per user, not global.
    create_request(&app, &other).await;
}

/// The polling endpoint returns the request with candidates; empty while
/// pending, populated once completed.
#[sqlx::test(migrations = "../../migrations")]
async fn test_poll_request_detail(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = register_and_login(&app, "poll@test.com").await;
    let id = create_request(&app, &token).await;

    let uri = format!("/api/v1/generation-requests/{id}");
    let response = get_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "pending");
    assert_eq!(json["candidates"].as_array().unwrap().len(), 0);

    complete_request(&pool, id).await;

    let response = get_auth(app, &uri, &token).await;
    let json = body_json(response).await;
    assert_eq!(json["status"], "completed");
    assert_eq!(json["candidates"].as_array().unwrap().len(), 2);
    assert_eq!(json["candidates"][0]["accepted"], false);
}

/// A failed request carries its error message to the client.
#[sqlx::test(migrations = "../../migrations")]
async fn test_failed_request_carries_message(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = register_and_login(&app, "fail@test.com").await;
    let id = create_request(&app, &token).await;

    GenerationRepo::mark_failed(&pool, id, "Model unavailable")
        .await
        .expect("mark_failed should succeed");

    let response = get_auth(app, &format!("/api/v1/generation-requests/{id}"), &token).await;
    let json = body_json(response).await;
    assert_eq!(json["status"], "failed");
    assert_eq!(json["error_message"], "Model unavailable");
}

/// A row holding a status string outside the known set is a server error,
/// never silently mapped to some other state.
#[sqlx::test(migrations = "../../migrations")]
async fn test_unknown_status_is_an_error(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = register_and_login(&app, "weird@test.com").await;
    let id = create_request(&app, &token).await;

    sqlx::query("UPDATE generation_requests SET status = 'half-done' WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .expect("raw update should succeed");

    let response = get_auth(app, &format!("/api/v1/generation-requests/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

/// Accepting candidates copies them into the deck as `source = ai` cards
/// and marks them accepted.
#[sqlx::test(migrations = "../../migrations")]
async fn test_accept_candidates(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = register_and_login(&app, "accept@test.com").await;
    let deck_id = create_deck(&app, &token, "Biology").await;
    let id = create_request(&app, &token).await;
    let candidate_ids = complete_request(&pool, id).await;

    let body = serde_json::json!({ "deck_id": deck_id, "candidate_ids": [candidate_ids[0]] });
    let uri = format!("/api/v1/generation-requests/{id}/accept");
    let response = post_json_auth(app.clone(), &uri, &token, body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let cards = body_json(response).await;
    assert_eq!(cards.as_array().unwrap().len(), 1);
    assert_eq!(cards[0]["source"], "ai");
    assert_eq!(cards[0]["deck_id"], deck_id);

    // The deck now holds the accepted card.
    let response = get_auth(
        app.clone(),
        &format!("/api/v1/decks/{deck_id}/flashcards"),
        &token,
    )
    .await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    // Re-accepting the same candidate is a conflict.
    let response = post_json_auth(app, &uri, &token, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Candidates cannot be accepted before the request completes.
#[sqlx::test(migrations = "../../migrations")]
async fn test_accept_while_pending_is_conflict(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_and_login(&app, "early@test.com").await;
    let deck_id = create_deck(&app, &token, "Too Soon").await;
    let id = create_request(&app, &token).await;

    let body = serde_json::json!({ "deck_id": deck_id, "candidate_ids": [1] });
    let uri = format!("/api/v1/generation-requests/{id}/accept");
    let response = post_json_auth(app, &uri, &token, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Another user's request reads as 404.
#[sqlx::test(migrations = "../../migrations")]
async fn test_cross_user_request_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (owner, _) = register_and_login(&app, "genowner@test.com").await;
    let (other, _) = register_and_login(&app, "genother@test.com").await;
    let id = create_request(&app, &owner).await;

    let response = get_auth(app, &format!("/api/v1/generation-requests/{id}"), &other).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Listing returns only the caller's requests, newest first.
#[sqlx::test(migrations = "../../migrations")]
async fn test_list_requests(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_and_login(&app, "genlist@test.com").await;
    let (other, _) = register_and_login(&app, "gennoise@test.com").await;

    let first = create_request(&app, &token).await;
    let second = create_request(&app, &token).await;
    create_request(&app, &other).await;

    let response = get_auth(app, "/api/v1/generation-requests", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    let ids: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![second, first]);
}
