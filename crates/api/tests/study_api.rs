//! Integration tests for study sessions, review events, and summaries.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_deck, create_flashcard, get_auth, patch_json_auth, post_json_auth,
    register_and_login,
};
use sqlx::PgPool;

async fn start_session(app: &axum::Router, token: &str, deck_id: i64) -> i64 {
    let body = serde_json::json!({ "deck_id": deck_id });
    let response = post_json_auth(app.clone(), "/api/v1/study-sessions", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn review(
    app: &axum::Router,
    token: &str,
    session_id: i64,
    flashcard_id: i64,
    rating: i64,
) -> axum::http::StatusCode {
    let body = serde_json::json!({ "flashcard_id": flashcard_id, "rating": rating });
    let uri = format!("/api/v1/study-sessions/{session_id}/reviews");
    post_json_auth(app.clone(), &uri, token, body).await.status()
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_start_session(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, user_id) = register_and_login(&app, "study@test.com").await;
    let deck_id = create_deck(&app, &token, "Drills").await;

    let body = serde_json::json!({ "deck_id": deck_id });
    let response = post_json_auth(app, "/api/v1/study-sessions", &token, body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["deck_id"], deck_id);
    assert_eq!(json["user_id"], user_id);
    assert!(json["completed_at"].is_null());
}

/// Starting a session on a missing or foreign deck is a 404.
#[sqlx::test(migrations = "../../migrations")]
async fn test_start_session_foreign_deck(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (owner, _) = register_and_login(&app, "sowner@test.com").await;
    let (other, _) = register_and_login(&app, "sother@test.com").await;
    let deck_id = create_deck(&app, &owner, "Hidden").await;

    let body = serde_json::json!({ "deck_id": deck_id });
    let response = post_json_auth(app, "/api/v1/study-sessions", &other, body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Recording reviews appends events; each rating must be 0..=3 and the card
/// must live in the session's deck.
#[sqlx::test(migrations = "../../migrations")]
async fn test_record_reviews(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_and_login(&app, "rev@test.com").await;
    let deck_id = create_deck(&app, &token, "Reviewed").await;
    let card = create_flashcard(&app, &token, deck_id, "front").await;
    let stray_deck = create_deck(&app, &token, "Stray").await;
    let stray_card = create_flashcard(&app, &token, stray_deck, "elsewhere").await;
    let session = start_session(&app, &token, deck_id).await;

    assert_eq!(review(&app, &token, session, card, 2).await, StatusCode::CREATED);
    // A card may be reviewed more than once in a session.
    assert_eq!(review(&app, &token, session, card, 0).await, StatusCode::CREATED);

    // Out-of-range ratings are rejected.
    assert_eq!(review(&app, &token, session, card, 4).await, StatusCode::BAD_REQUEST);

    // A card from another deck is a 404.
    assert_eq!(
        review(&app, &token, session, stray_card, 2).await,
        StatusCode::NOT_FOUND
    );
}

/// Completing a session stamps `completed_at`; a second completion is a
/// conflict, and a completed session accepts no further reviews.
#[sqlx::test(migrations = "../../migrations")]
async fn test_complete_session(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_and_login(&app, "done@test.com").await;
    let deck_id = create_deck(&app, &token, "Finished").await;
    let card = create_flashcard(&app, &token, deck_id, "front").await;
    let session = start_session(&app, &token, deck_id).await;

    let uri = format!("/api/v1/study-sessions/{session}/complete");
    let response = patch_json_auth(app.clone(), &uri, &token, serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["completed_at"].is_string());

    let response = patch_json_auth(app.clone(), &uri, &token, serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    assert_eq!(review(&app, &token, session, card, 2).await, StatusCode::CONFLICT);
}

/// The summary aggregates totals, per-rating counts, and duration.
#[sqlx::test(migrations = "../../migrations")]
async fn test_session_summary(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_and_login(&app, "sum@test.com").await;
    let deck_id = create_deck(&app, &token, "Summed").await;
    let card_a = create_flashcard(&app, &token, deck_id, "a").await;
    let card_b = create_flashcard(&app, &token, deck_id, "b").await;
    let session = start_session(&app, &token, deck_id).await;

    review(&app, &token, session, card_a, 2).await;
    review(&app, &token, session, card_a, 3).await;
    review(&app, &token, session, card_b, 0).await;

    // Summary works on an open session, with no duration yet.
    let uri = format!("/api/v1/study-sessions/{session}/summary");
    let response = get_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total_reviews"], 3);
    assert_eq!(json["distinct_flashcards"], 2);
    assert!(json["duration_secs"].is_null());

    let complete_uri = format!("/api/v1/study-sessions/{session}/complete");
    patch_json_auth(app.clone(), &complete_uri, &token, serde_json::json!({})).await;

    let response = get_auth(app, &uri, &token).await;
    let json = body_json(response).await;
    assert_eq!(json["session_id"], session);
    assert_eq!(json["total_reviews"], 3);
    assert_eq!(json["good_count"], 1);
    assert_eq!(json["easy_count"], 1);
    assert_eq!(json["blackout_count"], 1);
    assert_eq!(json["hard_count"], 0);
    assert!(json["duration_secs"].is_number());
}

/// Sessions are scoped per user.
#[sqlx::test(migrations = "../../migrations")]
async fn test_cross_user_session_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (owner, _) = register_and_login(&app, "sessmine@test.com").await;
    let (other, _) = register_and_login(&app, "sesstheirs@test.com").await;
    let deck_id = create_deck(&app, &owner, "Mine").await;
    let session = start_session(&app, &owner, deck_id).await;

    let response = get_auth(app.clone(), &format!("/api/v1/study-sessions/{session}"), &other).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let uri = format!("/api/v1/study-sessions/{session}/complete");
    let response = patch_json_auth(app, &uri, &other, serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Listing returns the caller's sessions, newest first.
#[sqlx::test(migrations = "../../migrations")]
async fn test_list_sessions(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_and_login(&app, "sesslist@test.com").await;
    let deck_id = create_deck(&app, &token, "Repeat").await;

    let first = start_session(&app, &token, deck_id).await;
    let second = start_session(&app, &token, deck_id).await;

    let response = get_auth(app, "/api/v1/study-sessions", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    let ids: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![second, first]);
}
