//! Knowledge-base entry CRUD. Reading is public (the storefront's support
//! widget retrieves from it); writing is admin-only.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use gamevault_core::error::CoreError;
use gamevault_core::types::DbId;
use gamevault_db::models::knowledge_base::{CreateEntry, EntryListParams, UpdateEntry};
use gamevault_db::repositories::KnowledgeBaseRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/knowledge-base
pub async fn list_entries(
    State(state): State<AppState>,
    Query(params): Query<EntryListParams>,
) -> AppResult<impl IntoResponse> {
    let entries = KnowledgeBaseRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/knowledge-base (admin)
pub async fn create_entry(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateEntry>,
) -> AppResult<impl IntoResponse> {
    check_entry_text(&input.question, &input.answer)?;

    let entry = KnowledgeBaseRepo::create(&state.pool, &input, None).await?;

    tracing::info!(entry_id = entry.id, user_id = admin.user_id, "KB entry created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// PUT /api/knowledge-base/{id} (admin)
pub async fn update_entry(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEntry>,
) -> AppResult<impl IntoResponse> {
    if matches!(input.question.as_deref(), Some("")) {
        return Err(AppError::BadRequest("question must not be empty".into()));
    }
    if matches!(input.answer.as_deref(), Some("")) {
        return Err(AppError::BadRequest("answer must not be empty".into()));
    }

    let entry = KnowledgeBaseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Knowledge-base entry", id.to_string()))?;

    tracing::info!(entry_id = id, user_id = admin.user_id, "KB entry updated");

    Ok(Json(DataResponse { data: entry }))
}

/// DELETE /api/knowledge-base/{id} (admin)
pub async fn delete_entry(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = KnowledgeBaseRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found(
            "Knowledge-base entry",
            id.to_string(),
        )));
    }

    tracing::info!(entry_id = id, user_id = admin.user_id, "KB entry deleted");

    Ok(StatusCode::NO_CONTENT)
}

pub(crate) fn check_entry_text(question: &str, answer: &str) -> Result<(), AppError> {
    if question.trim().is_empty() {
        return Err(AppError::BadRequest("question must not be empty".into()));
    }
    if answer.trim().is_empty() {
        return Err(AppError::BadRequest("answer must not be empty".into()));
    }
    Ok(())
}
