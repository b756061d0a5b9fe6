//! Knowledge-base entry models and DTOs.

use gamevault_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `knowledge_base_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct KnowledgeBaseEntry {
    pub id: DbId,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub tags: Vec<String>,
    /// Higher priority entries are surfaced first.
    pub priority: i32,
    /// Set when the entry was promoted from a support conversation.
    pub source_conversation_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for `POST /api/knowledge-base`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEntry {
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub priority: i32,
}

/// DTO for `PUT /api/knowledge-base/{id}`. Only provided fields change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEntry {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub priority: Option<i32>,
}

/// Query parameters for `GET /api/knowledge-base`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryListParams {
    /// Case-insensitive substring match on question or answer.
    pub q: Option<String>,
    pub category: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
