//! Review workflow over AI support transcripts: browse, flag, and promote
//! good answers into the knowledge base.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use gamevault_core::error::CoreError;
use gamevault_core::types::DbId;
use gamevault_db::models::conversation::{
    Conversation, ConversationListParams, PromoteRequest, ReviewUpdate,
};
use gamevault_db::models::knowledge_base::CreateEntry;
use gamevault_db::repositories::{ConversationRepo, KnowledgeBaseRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

use super::knowledge_base::check_entry_text;

/// GET /api/support/conversations (admin)
pub async fn list_conversations(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ConversationListParams>,
) -> AppResult<impl IntoResponse> {
    let summaries = ConversationRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: summaries }))
}

/// GET /api/support/conversations/{id} (admin)
pub async fn get_conversation(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let conversation = ConversationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Conversation", id.to_string()))?;

    Ok(Json(DataResponse { data: conversation }))
}

/// PUT /api/support/conversations/{id}/review (admin)
pub async fn review_conversation(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewUpdate>,
) -> AppResult<impl IntoResponse> {
    let conversation = ConversationRepo::set_review(&state.pool, id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Conversation", id.to_string()))?;

    tracing::info!(
        conversation_id = id,
        reviewed = conversation.reviewed,
        flagged = conversation.flagged,
        user_id = admin.user_id,
        "Conversation review updated"
    );

    Ok(Json(DataResponse { data: conversation }))
}

/// POST /api/support/conversations/{id}/promote (admin)
///
/// Turns a question/answer exchange from the transcript into a
/// knowledge-base entry. The pair defaults to the user message at
/// `message_index` and the assistant reply after it; either side may be
/// overridden with edited text. The conversation is marked reviewed on
/// success.
pub async fn promote_conversation(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<PromoteRequest>,
) -> AppResult<impl IntoResponse> {
    let conversation = ConversationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Conversation", id.to_string()))?;

    let (question, answer) = resolve_pair(&conversation, &input)?;
    check_entry_text(&question, &answer)?;

    let create = CreateEntry {
        question,
        answer,
        category: input.category.clone(),
        tags: input.tags.clone(),
        priority: input.priority,
    };
    let entry = KnowledgeBaseRepo::create(&state.pool, &create, Some(id)).await?;
    ConversationRepo::mark_reviewed(&state.pool, id).await?;

    tracing::info!(
        conversation_id = id,
        entry_id = entry.id,
        user_id = admin.user_id,
        "Conversation promoted to knowledge base"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// GET /api/support/analytics (admin)
pub async fn analytics(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let analytics = ConversationRepo::analytics(&state.pool).await?;
    Ok(Json(DataResponse { data: analytics }))
}

/// Pick the question/answer pair to promote: explicit overrides win,
/// otherwise the transcript pair at `message_index`.
fn resolve_pair(
    conversation: &Conversation,
    input: &PromoteRequest,
) -> Result<(String, String), AppError> {
    if let (Some(question), Some(answer)) = (&input.question, &input.answer) {
        return Ok((question.clone(), answer.clone()));
    }

    let index = input.message_index.ok_or_else(|| {
        AppError::BadRequest(
            "Either question and answer, or a message_index, must be provided".into(),
        )
    })?;

    let messages = conversation
        .messages
        .as_array()
        .ok_or_else(|| AppError::BadRequest("Conversation transcript is empty".into()))?;

    let question_msg = messages
        .get(index)
        .filter(|m| m["role"] == "user")
        .ok_or_else(|| {
            AppError::BadRequest(format!("No user message at index {index}"))
        })?;
    let answer_msg = messages
        .get(index + 1)
        .filter(|m| m["role"] == "assistant")
        .ok_or_else(|| {
            AppError::BadRequest(format!("No assistant reply after index {index}"))
        })?;

    let text = |m: &serde_json::Value| {
        m["content"].as_str().map(str::to_string).unwrap_or_default()
    };

    let question = input.question.clone().unwrap_or_else(|| text(question_msg));
    let answer = input.answer.clone().unwrap_or_else(|| text(answer_msg));
    Ok((question, answer))
}
