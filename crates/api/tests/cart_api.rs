//! HTTP-level integration tests for the per-session cart.
//!
//! Carts live in process memory, so each test builds one app and clones
//! the router per request to keep the same `CartStore` across calls.

mod common;

use axum::http::StatusCode;
use common::{delete, expect_status, get, post_json, put_json, seed_game};
use sqlx::PgPool;

async fn seed_non_rentable(pool: &PgPool, barcode: &str) {
    sqlx::query(
        "INSERT INTO games (barcode, title, price, stock_with_case, category) \
         VALUES ($1, 'No Rentals', 3000, 2, 'action')",
    )
    .bind(barcode)
    .execute(pool)
    .await
    .expect("game seed should succeed");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_cart_reads_as_purchase_mode(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/cart/session-1").await;
    let json = expect_status(response, StatusCode::OK).await;

    assert_eq!(json["data"]["mode"], "purchase");
    assert_eq!(json["data"]["lines"], serde_json::json!([]));
    assert_eq!(json["data"]["totals"]["item_count"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn add_item_snapshots_price_and_totals(pool: PgPool) {
    seed_game(&pool, "40000001", 3500, 3).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/cart/session-1/items",
        serde_json::json!({"barcode": "40000001", "quantity": 2, "variant": "withCase"}),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;

    assert_eq!(json["data"]["lines"][0]["unit_price"], 3500);
    assert_eq!(json["data"]["lines"][0]["quantity"], 2);
    assert_eq!(json["data"]["totals"]["subtotal"], 7000);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn adding_same_line_merges_quantities(pool: PgPool) {
    seed_game(&pool, "40000001", 3500, 3).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({"barcode": "40000001", "quantity": 1, "variant": "withCase"});
    post_json(app.clone(), "/api/cart/session-1/items", body.clone()).await;
    let response = post_json(app, "/api/cart/session-1/items", body).await;
    let json = expect_status(response, StatusCode::OK).await;

    assert_eq!(json["data"]["lines"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["lines"][0]["quantity"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_barcode_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/cart/session-1/items",
        serde_json::json!({"barcode": "99999999", "variant": "withCase"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_quantity_zero_removes_line(pool: PgPool) {
    seed_game(&pool, "40000001", 3500, 3).await;
    let app = common::build_test_app(pool);

    post_json(
        app.clone(),
        "/api/cart/session-1/items",
        serde_json::json!({"barcode": "40000001", "quantity": 2, "variant": "withCase"}),
    )
    .await;

    let response = put_json(
        app,
        "/api/cart/session-1/items",
        serde_json::json!({"barcode": "40000001", "variant": "withCase", "quantity": 0}),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;

    assert_eq!(json["data"]["lines"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_unknown_line_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        "/api/cart/session-1/items",
        serde_json::json!({"barcode": "40000001", "variant": "withCase", "quantity": 3}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn remove_item_by_variant_path(pool: PgPool) {
    seed_game(&pool, "40000001", 3500, 3).await;
    let app = common::build_test_app(pool);

    post_json(
        app.clone(),
        "/api/cart/session-1/items",
        serde_json::json!({"barcode": "40000001", "variant": "cartridgeOnly"}),
    )
    .await;

    let response = delete(app, "/api/cart/session-1/items/40000001/cartridgeOnly").await;
    let json = expect_status(response, StatusCode::OK).await;

    assert_eq!(json["data"]["lines"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn variants_are_separate_lines(pool: PgPool) {
    seed_game(&pool, "40000001", 3500, 3).await;
    let app = common::build_test_app(pool);

    post_json(
        app.clone(),
        "/api/cart/session-1/items",
        serde_json::json!({"barcode": "40000001", "variant": "withCase"}),
    )
    .await;
    let response = post_json(
        app,
        "/api/cart/session-1/items",
        serde_json::json!({"barcode": "40000001", "variant": "cartridgeOnly"}),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;

    assert_eq!(json["data"]["lines"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn switching_mode_clears_lines(pool: PgPool) {
    seed_game(&pool, "40000001", 3500, 3).await;
    let app = common::build_test_app(pool);

    post_json(
        app.clone(),
        "/api/cart/session-1/items",
        serde_json::json!({"barcode": "40000001", "variant": "withCase"}),
    )
    .await;

    let response = put_json(
        app,
        "/api/cart/session-1/mode",
        serde_json::json!({"mode": "rental"}),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;

    assert_eq!(json["data"]["mode"], "rental");
    assert_eq!(json["data"]["lines"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rental_cart_rejects_non_rentable_listing(pool: PgPool) {
    seed_non_rentable(&pool, "40000009").await;
    let app = common::build_test_app(pool);

    put_json(
        app.clone(),
        "/api/cart/session-1/mode",
        serde_json::json!({"mode": "rental"}),
    )
    .await;

    let response = post_json(
        app,
        "/api/cart/session-1/items",
        serde_json::json!({"barcode": "40000009", "variant": "withCase"}),
    )
    .await;

    let json = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn clear_cart_empties_session(pool: PgPool) {
    seed_game(&pool, "40000001", 3500, 3).await;
    let app = common::build_test_app(pool);

    post_json(
        app.clone(),
        "/api/cart/session-1/items",
        serde_json::json!({"barcode": "40000001", "variant": "withCase"}),
    )
    .await;

    let response = delete(app, "/api/cart/session-1").await;
    let json = expect_status(response, StatusCode::OK).await;

    assert_eq!(json["data"]["lines"], serde_json::json!([]));
}
