//! HTTP-level integration tests for the support transcript review workflow.

mod common;

use axum::http::StatusCode;
use common::{body_json, expect_status, get_auth, post_json_auth, put_json_auth, seed_admin};
use sqlx::PgPool;

use gamevault_db::repositories::{ConversationRepo, KnowledgeBaseRepo};

fn transcript() -> serde_json::Value {
    serde_json::json!([
        {"role": "user", "content": "Can I trade in a game without its case?"},
        {"role": "assistant", "content": "Yes, cartridge-only trade-ins are accepted at a lower appraisal."},
        {"role": "user", "content": "Great, thanks!"},
        {"role": "assistant", "content": "Happy to help."}
    ])
}

async fn seed_conversation(pool: &PgPool, confidence: f64) -> i64 {
    ConversationRepo::create(pool, "web-session-1", &transcript(), 0.82, confidence)
        .await
        .expect("conversation seed should succeed")
        .id
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_conversations_requires_admin(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/support/conversations", "bogus").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_conversations_returns_summaries(pool: PgPool) {
    let token = seed_admin(&pool).await;
    seed_conversation(&pool, 0.9).await;

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/support/conversations", &token).await).await;

    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["session_id"], "web-session-1");
    // Summaries omit the transcript body.
    assert!(rows[0].get("messages").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_conversation_includes_transcript(pool: PgPool) {
    let token = seed_admin(&pool).await;
    let id = seed_conversation(&pool, 0.9).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/support/conversations/{id}"), &token).await;
    let json = expect_status(response, StatusCode::OK).await;

    assert_eq!(json["data"]["messages"][0]["role"], "user");
    assert_eq!(json["data"]["reviewed"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn review_sets_flags(pool: PgPool) {
    let token = seed_admin(&pool).await;
    let id = seed_conversation(&pool, 0.9).await;

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/support/conversations/{id}/review"),
        &token,
        serde_json::json!({"reviewed": true, "flagged": true}),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;

    assert_eq!(json["data"]["reviewed"], true);
    assert_eq!(json["data"]["flagged"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn promote_creates_linked_entry_and_marks_reviewed(pool: PgPool) {
    let token = seed_admin(&pool).await;
    let id = seed_conversation(&pool, 0.9).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/support/conversations/{id}/promote"),
        &token,
        serde_json::json!({"message_index": 0, "category": "trades", "tags": ["trade-in"]}),
    )
    .await;
    let json = expect_status(response, StatusCode::CREATED).await;

    assert_eq!(
        json["data"]["question"],
        "Can I trade in a game without its case?"
    );
    assert_eq!(json["data"]["source_conversation_id"], id);
    assert_eq!(json["data"]["category"], "trades");

    // The entry is durably linked, not just echoed in the response.
    let entry_id = json["data"]["id"].as_i64().expect("entry id");
    let stored = KnowledgeBaseRepo::find_by_id(&pool, entry_id)
        .await
        .expect("lookup should succeed")
        .expect("promoted entry should be persisted");
    assert_eq!(stored.source_conversation_id, Some(id));

    let app = common::build_test_app(pool);
    let conversation = body_json(
        get_auth(app, &format!("/api/support/conversations/{id}"), &token).await,
    )
    .await;
    assert_eq!(conversation["data"]["reviewed"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn promote_with_edited_text_overrides_transcript(pool: PgPool) {
    let token = seed_admin(&pool).await;
    let id = seed_conversation(&pool, 0.9).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/support/conversations/{id}/promote"),
        &token,
        serde_json::json!({
            "question": "Are cartridge-only trade-ins accepted?",
            "answer": "Yes, at a reduced appraisal."
        }),
    )
    .await;
    let json = expect_status(response, StatusCode::CREATED).await;

    assert_eq!(json["data"]["question"], "Are cartridge-only trade-ins accepted?");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn promote_rejects_index_not_pointing_at_user_message(pool: PgPool) {
    let token = seed_admin(&pool).await;
    let id = seed_conversation(&pool, 0.9).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/support/conversations/{id}/promote"),
        &token,
        serde_json::json!({"message_index": 1}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn analytics_aggregates_review_state_and_confidence(pool: PgPool) {
    let token = seed_admin(&pool).await;
    let reviewed_id = seed_conversation(&pool, 0.9).await;
    seed_conversation(&pool, 0.3).await;

    let app = common::build_test_app(pool.clone());
    put_json_auth(
        app,
        &format!("/api/support/conversations/{reviewed_id}/review"),
        &token,
        serde_json::json!({"reviewed": true}),
    )
    .await;

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/support/analytics", &token).await).await;

    assert_eq!(json["data"]["total_conversations"], 2);
    assert_eq!(json["data"]["reviewed_count"], 1);
    assert_eq!(json["data"]["low_confidence_count"], 1);
    let avg = json["data"]["avg_answer_confidence"].as_f64().unwrap();
    assert!((avg - 0.6).abs() < 1e-9);
}
