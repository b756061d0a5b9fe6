//! HTTP-level integration tests for admin-only operations: the legacy
//! stock backfill and image upload.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, expect_status, seed_admin};
use sqlx::PgPool;
use tower::ServiceExt;

/// A 1x1 transparent PNG.
const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f,
    0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x44, 0x41, 0x54, 0x78, 0xda, 0x63, 0x64,
    0x60, 0xf8, 0x5f, 0x0f, 0x00, 0x02, 0x87, 0x01, 0x80, 0xeb, 0x47, 0xba, 0x92, 0x00, 0x00,
    0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

async fn post_multipart(
    app: axum::Router,
    uri: &str,
    token: &str,
    field_name: &str,
    payload: &[u8],
) -> axum::http::Response<Body> {
    let boundary = "gamevault-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field_name}\"; filename=\"cover.png\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::post(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Legacy stock backfill
// ---------------------------------------------------------------------------

async fn seed_legacy_game(pool: &PgPool, barcode: &str, legacy: i32) {
    sqlx::query(
        "INSERT INTO games (barcode, title, price, stock_legacy, category) \
         VALUES ($1, 'Legacy Import', 3000, $2, 'action')",
    )
    .bind(barcode)
    .bind(legacy)
    .execute(pool)
    .await
    .expect("game seed should succeed");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn migrate_stocks_moves_legacy_counts(pool: PgPool) {
    let token = seed_admin(&pool).await;
    seed_legacy_game(&pool, "40000001", 4).await;

    let app = common::build_test_app(pool.clone());
    let response = common::post_json_auth(
        app,
        "/api/admin/migrate-stocks",
        &token,
        serde_json::json!({}),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["games_migrated"], 1);

    let (with_case, legacy): (i32, i32) = sqlx::query_as(
        "SELECT stock_with_case, stock_legacy FROM games WHERE barcode = '40000001'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(with_case, 4);
    assert_eq!(legacy, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn migrate_stocks_is_idempotent(pool: PgPool) {
    let token = seed_admin(&pool).await;
    seed_legacy_game(&pool, "40000001", 4).await;

    let app = common::build_test_app(pool.clone());
    common::post_json_auth(app, "/api/admin/migrate-stocks", &token, serde_json::json!({}))
        .await;

    let app = common::build_test_app(pool);
    let json = body_json(
        common::post_json_auth(
            app,
            "/api/admin/migrate-stocks",
            &token,
            serde_json::json!({}),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["games_migrated"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn migrate_stocks_skips_already_split_rows(pool: PgPool) {
    let token = seed_admin(&pool).await;
    sqlx::query(
        "INSERT INTO games (barcode, title, price, stock_legacy, stock_with_case, category) \
         VALUES ('40000002', 'Already Split', 3000, 4, 1, 'action')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let app = common::build_test_app(pool);
    let json = body_json(
        common::post_json_auth(
            app,
            "/api/admin/migrate-stocks",
            &token,
            serde_json::json!({}),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["games_migrated"], 0);
}

// ---------------------------------------------------------------------------
// Image upload
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_png_returns_url_and_dimensions(pool: PgPool) {
    let token = seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_multipart(app, "/api/upload", &token, "file", TINY_PNG).await;
    let json = expect_status(response, StatusCode::CREATED).await;

    assert!(json["data"]["url"].as_str().unwrap().starts_with("/uploads/"));
    assert!(json["data"]["url"].as_str().unwrap().ends_with(".png"));
    assert_eq!(json["data"]["width"], 1);
    assert_eq!(json["data"]["height"], 1);
    assert_eq!(json["data"]["content_type"], "image/png");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_rejects_non_image_payload(pool: PgPool) {
    let token = seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_multipart(app, "/api/upload", &token, "file", b"just some text").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_rejects_missing_file_field(pool: PgPool) {
    let token = seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_multipart(app, "/api/upload", &token, "attachment", TINY_PNG).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_requires_admin(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_multipart(app, "/api/upload", "bogus", "file", TINY_PNG).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
