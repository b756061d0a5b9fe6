//! HTTP-level integration tests for knowledge-base entry CRUD.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, expect_status, get, post_json_auth, put_json_auth, seed_admin,
};
use sqlx::PgPool;

fn entry() -> serde_json::Value {
    serde_json::json!({
        "question": "Do you ship cartridges without cases?",
        "answer": "Yes, cartridge-only orders ship in a padded sleeve.",
        "category": "shipping",
        "tags": ["shipping", "variants"],
        "priority": 5
    })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_entry_returns_201(pool: PgPool) {
    let token = seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(app, "/api/knowledge-base", &token, entry()).await;
    let json = expect_status(response, StatusCode::CREATED).await;

    assert_eq!(json["data"]["category"], "shipping");
    assert_eq!(json["data"]["priority"], 5);
    assert!(json["data"]["source_conversation_id"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_entry_requires_admin(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/knowledge-base", "bogus", entry()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_entry_rejects_blank_question(pool: PgPool) {
    let token = seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let mut body = entry();
    body["question"] = serde_json::json!("   ");
    let response = post_json_auth(app, "/api/knowledge-base", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_entries_is_public_and_priority_ordered(pool: PgPool) {
    let token = seed_admin(&pool).await;

    let mut low = entry();
    low["priority"] = serde_json::json!(1);
    let app = common::build_test_app(pool.clone());
    post_json_auth(app, "/api/knowledge-base", &token, low).await;

    let mut high = entry();
    high["question"] = serde_json::json!("What is the rental deposit?");
    high["priority"] = serde_json::json!(9);
    let app = common::build_test_app(pool.clone());
    post_json_auth(app, "/api/knowledge-base", &token, high).await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/knowledge-base").await).await;

    let entries = json["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["priority"], 9);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_entries_searches_question_and_answer(pool: PgPool) {
    let token = seed_admin(&pool).await;
    let app = common::build_test_app(pool.clone());
    post_json_auth(app, "/api/knowledge-base", &token, entry()).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/knowledge-base?q=padded+sleeve").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/knowledge-base?q=nonsense").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_entry_changes_only_provided_fields(pool: PgPool) {
    let token = seed_admin(&pool).await;
    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json_auth(app, "/api/knowledge-base", &token, entry()).await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/knowledge-base/{id}"),
        &token,
        serde_json::json!({"priority": 10}),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;

    assert_eq!(json["data"]["priority"], 10);
    assert_eq!(json["data"]["category"], "shipping");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_entry_returns_204_then_404(pool: PgPool) {
    let token = seed_admin(&pool).await;
    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json_auth(app, "/api/knowledge-base", &token, entry()).await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/knowledge-base/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = delete_auth(app, &format!("/api/knowledge-base/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
