//! Repository for the `conversations` table.

use sqlx::{PgPool, QueryBuilder};

use gamevault_core::types::DbId;

use crate::models::conversation::{
    Conversation, ConversationListParams, ConversationSummary, ReviewUpdate, SupportAnalytics,
};

/// Column list for `conversations` queries.
const CONVERSATION_COLUMNS: &str = "\
    id, session_id, messages, retrieval_score, answer_confidence, reviewed, \
    flagged, created_at, updated_at";

/// Column list for the transcript-free listing rows.
const SUMMARY_COLUMNS: &str = "\
    id, session_id, retrieval_score, answer_confidence, reviewed, flagged, created_at";

/// Default page size for conversation listing.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for conversation listing.
const MAX_LIMIT: i64 = 200;

/// Answer-confidence cutoff below which a conversation counts as
/// low-confidence in the analytics view.
pub const LOW_CONFIDENCE_CUTOFF: f64 = 0.5;

/// Provides review operations over AI support transcripts.
pub struct ConversationRepo;

impl ConversationRepo {
    /// Insert a transcript (used by the support pipeline and tests).
    pub async fn create(
        pool: &PgPool,
        session_id: &str,
        messages: &serde_json::Value,
        retrieval_score: f64,
        answer_confidence: f64,
    ) -> Result<Conversation, sqlx::Error> {
        let query = format!(
            "INSERT INTO conversations (session_id, messages, retrieval_score, answer_confidence) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {CONVERSATION_COLUMNS}"
        );
        sqlx::query_as::<_, Conversation>(&query)
            .bind(session_id)
            .bind(messages)
            .bind(retrieval_score)
            .bind(answer_confidence)
            .fetch_one(pool)
            .await
    }

    /// Find a conversation with its full transcript.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Conversation>, sqlx::Error> {
        let query = format!("SELECT {CONVERSATION_COLUMNS} FROM conversations WHERE id = $1");
        sqlx::query_as::<_, Conversation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List transcript summaries, newest first, optionally filtered by
    /// review state.
    pub async fn list(
        pool: &PgPool,
        params: &ConversationListParams,
    ) -> Result<Vec<ConversationSummary>, sqlx::Error> {
        let limit = super::clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
        let offset = super::clamp_offset(params.offset);

        let mut qb: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(format!(
            "SELECT {SUMMARY_COLUMNS} FROM conversations WHERE TRUE"
        ));

        if let Some(reviewed) = params.reviewed {
            qb.push(" AND reviewed = ").push_bind(reviewed);
        }
        if let Some(flagged) = params.flagged {
            qb.push(" AND flagged = ").push_bind(flagged);
        }

        qb.push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        qb.build_query_as::<ConversationSummary>().fetch_all(pool).await
    }

    /// Update review flags. Returns `None` for an unknown id.
    pub async fn set_review(
        pool: &PgPool,
        id: DbId,
        input: &ReviewUpdate,
    ) -> Result<Option<Conversation>, sqlx::Error> {
        let query = format!(
            "UPDATE conversations SET \
             reviewed = COALESCE($2, reviewed), \
             flagged = COALESCE($3, flagged) \
             WHERE id = $1 \
             RETURNING {CONVERSATION_COLUMNS}"
        );
        sqlx::query_as::<_, Conversation>(&query)
            .bind(id)
            .bind(input.reviewed)
            .bind(input.flagged)
            .fetch_optional(pool)
            .await
    }

    /// Mark a conversation reviewed (used after a successful promotion).
    pub async fn mark_reviewed(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE conversations SET reviewed = TRUE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Retrieval-quality aggregates for the analytics endpoint.
    pub async fn analytics(pool: &PgPool) -> Result<SupportAnalytics, sqlx::Error> {
        sqlx::query_as::<_, SupportAnalytics>(
            "SELECT \
             COUNT(*) AS total_conversations, \
             COUNT(*) FILTER (WHERE reviewed) AS reviewed_count, \
             COUNT(*) FILTER (WHERE flagged) AS flagged_count, \
             COALESCE(AVG(retrieval_score), 0)::DOUBLE PRECISION AS avg_retrieval_score, \
             COALESCE(AVG(answer_confidence), 0)::DOUBLE PRECISION AS avg_answer_confidence, \
             COUNT(*) FILTER (WHERE answer_confidence < $1) AS low_confidence_count \
             FROM conversations",
        )
        .bind(LOW_CONFIDENCE_CUTOFF)
        .fetch_one(pool)
        .await
    }
}
