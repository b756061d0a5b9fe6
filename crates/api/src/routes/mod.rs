pub mod admin;
pub mod auth;
pub mod cart;
pub mod financials;
pub mod games;
pub mod health;
pub mod knowledge_base;
pub mod purchases;
pub mod rentals;
pub mod support;
pub mod trades;
pub mod upload;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /auth/login                                  login (public)
/// /auth/refresh                                rotate refresh token (public)
///
/// /games                                       list (public), create (admin)
/// /games/bulk-update                           bulk price update (admin)
/// /games/{barcode}                             get (public), update/delete (admin)
///
/// /cart/{session_id}                           get, clear
/// /cart/{session_id}/items                     add, update
/// /cart/{session_id}/items/{barcode}/{variant} remove
/// /cart/{session_id}/mode                      switch flow
///
/// /purchases                                   checkout (public), list (admin)
/// /purchases/{id}                              detail (admin)
/// /purchases/{id}/status                       update status (admin)
/// /rentals                                     checkout (public), list (admin)
/// /rentals/{id}                                detail (admin)
/// /rentals/{id}/status                         update status (admin)
/// /trades                                      submit (public), list (admin)
/// /trades/{id}                                 detail (admin)
/// /trades/{id}/status                          update status (admin)
///
/// /knowledge-base                              list (public), create (admin)
/// /knowledge-base/{id}                         update, delete (admin)
///
/// /support/conversations                       list (admin)
/// /support/conversations/{id}                  transcript (admin)
/// /support/conversations/{id}/review           set reviewed/flagged (admin)
/// /support/conversations/{id}/promote          promote Q&A to KB (admin)
/// /support/analytics                           aggregates (admin)
///
/// /financials                                  summary (admin)
/// /upload                                      multipart image upload (admin)
/// /admin/migrate-stocks                        legacy stock backfill (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/games", games::router())
        .nest("/cart", cart::router())
        .nest("/purchases", purchases::router())
        .nest("/rentals", rentals::router())
        .nest("/trades", trades::router())
        .nest("/knowledge-base", knowledge_base::router())
        .nest("/support", support::router())
        .nest("/financials", financials::router())
        .nest("/upload", upload::router())
        .nest("/admin", admin::router())
}
