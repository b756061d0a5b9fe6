//! AI support-conversation models and DTOs.

use gamevault_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `conversations` table. `messages` is the raw transcript
/// (`[{ "role": ..., "content": ..., "ts": ... }]`) stored as JSONB.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Conversation {
    pub id: DbId,
    pub session_id: String,
    pub messages: serde_json::Value,
    /// Mean retrieval similarity of the knowledge-base passages used.
    pub retrieval_score: f64,
    /// Model self-reported answer confidence.
    pub answer_confidence: f64,
    pub reviewed: bool,
    pub flagged: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Listing row without the transcript body, for the review table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ConversationSummary {
    pub id: DbId,
    pub session_id: String,
    pub retrieval_score: f64,
    pub answer_confidence: f64,
    pub reviewed: bool,
    pub flagged: bool,
    pub created_at: Timestamp,
}

/// Query parameters for `GET /api/support/conversations`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConversationListParams {
    pub reviewed: Option<bool>,
    pub flagged: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// DTO for `PUT /api/support/conversations/{id}/review`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewUpdate {
    pub reviewed: Option<bool>,
    pub flagged: Option<bool>,
}

/// DTO for `POST /api/support/conversations/{id}/promote`.
///
/// The question/answer default to the transcript pair at `message_index`
/// (a user message followed by the assistant reply) but may be overridden
/// with edited text.
#[derive(Debug, Clone, Deserialize)]
pub struct PromoteRequest {
    pub message_index: Option<usize>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub priority: i32,
}

/// Aggregates for `GET /api/support/analytics`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SupportAnalytics {
    pub total_conversations: i64,
    pub reviewed_count: i64,
    pub flagged_count: i64,
    pub avg_retrieval_score: f64,
    pub avg_answer_confidence: f64,
    /// Conversations whose answer confidence fell below the review cutoff.
    pub low_confidence_count: i64,
}
