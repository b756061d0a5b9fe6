//! HTTP-level integration tests for the financial summary.

mod common;

use axum::http::StatusCode;
use common::{body_json, expect_status, get_auth, post_json, put_json_auth, seed_admin, seed_game};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn summary_requires_admin(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/financials", "bogus").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_store_reports_zeroes(pool: PgPool) {
    let token = seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let json = body_json(get_auth(app, "/api/financials", &token).await).await;

    assert_eq!(json["data"]["purchase_revenue"], 0);
    assert_eq!(json["data"]["gross_profit"], 0);
    assert_eq!(json["data"]["deposits_held"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn summary_aggregates_all_three_flows(pool: PgPool) {
    let token = seed_admin(&pool).await;
    // seed_game sets cost_price to half the price.
    seed_game(&pool, "40000001", 4000, 5).await;

    // Purchase: 2 units at 4000 -> revenue 8000, COGS 2 * 2000.
    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/purchases",
        serde_json::json!({
            "customer_name": "Dana", "customer_phone": "555-0101",
            "delivery_address": "12 Example Street", "delivery_method": "courier",
            "items": [{"barcode": "40000001", "quantity": 2, "variant": "withCase"}]
        }),
    )
    .await;

    // Rental: 2 days daily at 10%/day of 4000 -> fee 800, deposit held 2000.
    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/rentals",
        serde_json::json!({
            "customer_name": "Dana", "customer_phone": "555-0101",
            "delivery_address": "12 Example Street", "days": 2,
            "items": [{"barcode": "40000001", "variant": "withCase"}]
        }),
    )
    .await;

    // Trade: hand-in 1000 against a 4000 listing -> fee 500, cash 3000.
    // Only accepted/completed trades count, so accept it.
    let app = common::build_test_app(pool.clone());
    let trade = body_json(
        post_json(
            app,
            "/api/trades",
            serde_json::json!({
                "customer_name": "Dana", "customer_phone": "555-0101",
                "items": [
                    {"title": "Hand-in", "value": 1000, "direction": "given"},
                    {"barcode": "40000001", "title": "", "value": 0,
                     "direction": "received", "variant": "withCase"}
                ]
            }),
        )
        .await,
    )
    .await;
    let trade_id = trade["data"]["id"].as_i64().unwrap();
    let app = common::build_test_app(pool.clone());
    put_json_auth(
        app,
        &format!("/api/trades/{trade_id}/status"),
        &token,
        serde_json::json!({"status": "accepted"}),
    )
    .await;

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/financials", &token).await).await;

    assert_eq!(json["data"]["purchase_revenue"], 8000);
    assert_eq!(json["data"]["purchase_count"], 1);
    assert_eq!(json["data"]["rental_fee_revenue"], 800);
    assert_eq!(json["data"]["deposits_held"], 2000);
    assert_eq!(json["data"]["trade_fee_revenue"], 500);
    assert_eq!(json["data"]["trade_cash_collected"], 3000);
    assert_eq!(json["data"]["cost_of_goods_sold"], 4000);
    // 8000 + 800 + 500 - 4000
    assert_eq!(json["data"]["gross_profit"], 5300);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn window_excludes_orders_outside_range(pool: PgPool) {
    let token = seed_admin(&pool).await;
    seed_game(&pool, "40000001", 4000, 5).await;

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/purchases",
        serde_json::json!({
            "customer_name": "Dana", "customer_phone": "555-0101",
            "delivery_address": "12 Example Street", "delivery_method": "courier",
            "items": [{"barcode": "40000001", "quantity": 1, "variant": "withCase"}]
        }),
    )
    .await;

    let app = common::build_test_app(pool);
    let json = body_json(
        get_auth(
            app,
            "/api/financials?from=2000-01-01T00:00:00Z&to=2000-12-31T00:00:00Z",
            &token,
        )
        .await,
    )
    .await;

    assert_eq!(json["data"]["purchase_revenue"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn inverted_window_returns_400(pool: PgPool) {
    let token = seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let response = get_auth(
        app,
        "/api/financials?from=2026-01-01T00:00:00Z&to=2025-01-01T00:00:00Z",
        &token,
    )
    .await;

    expect_status(response, StatusCode::BAD_REQUEST).await;
}
