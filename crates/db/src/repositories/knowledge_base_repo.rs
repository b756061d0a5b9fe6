//! Repository for the `knowledge_base_entries` table.

use sqlx::{PgPool, QueryBuilder};

use gamevault_core::types::DbId;

use crate::models::knowledge_base::{CreateEntry, EntryListParams, KnowledgeBaseEntry, UpdateEntry};

/// Column list for `knowledge_base_entries` queries.
const ENTRY_COLUMNS: &str = "\
    id, question, answer, category, tags, priority, source_conversation_id, \
    created_at, updated_at";

/// Default page size for entry listing.
const DEFAULT_LIMIT: i64 = 100;

/// Maximum page size for entry listing.
const MAX_LIMIT: i64 = 500;

/// Provides CRUD operations for knowledge-base entries.
pub struct KnowledgeBaseRepo;

impl KnowledgeBaseRepo {
    /// Insert a new entry; `source_conversation_id` links entries promoted
    /// from a support transcript.
    pub async fn create(
        pool: &PgPool,
        input: &CreateEntry,
        source_conversation_id: Option<DbId>,
    ) -> Result<KnowledgeBaseEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO knowledge_base_entries (question, answer, category, tags, priority, \
             source_conversation_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {ENTRY_COLUMNS}"
        );
        sqlx::query_as::<_, KnowledgeBaseEntry>(&query)
            .bind(&input.question)
            .bind(&input.answer)
            .bind(input.category.as_deref().unwrap_or("general"))
            .bind(&input.tags)
            .bind(input.priority)
            .bind(source_conversation_id)
            .fetch_one(pool)
            .await
    }

    /// Find an entry by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<KnowledgeBaseEntry>, sqlx::Error> {
        let query = format!("SELECT {ENTRY_COLUMNS} FROM knowledge_base_entries WHERE id = $1");
        sqlx::query_as::<_, KnowledgeBaseEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List entries, highest priority first, with optional text/category
    /// filtering.
    pub async fn list(
        pool: &PgPool,
        params: &EntryListParams,
    ) -> Result<Vec<KnowledgeBaseEntry>, sqlx::Error> {
        let limit = super::clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
        let offset = super::clamp_offset(params.offset);

        let mut qb: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(format!(
            "SELECT {ENTRY_COLUMNS} FROM knowledge_base_entries WHERE TRUE"
        ));

        if let Some(q) = params.q.as_deref().filter(|q| !q.is_empty()) {
            let pattern = format!("%{q}%");
            qb.push(" AND (question ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR answer ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(category) = &params.category {
            qb.push(" AND category = ").push_bind(category.clone());
        }

        qb.push(" ORDER BY priority DESC, id DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        qb.build_query_as::<KnowledgeBaseEntry>().fetch_all(pool).await
    }

    /// Partially update an entry. Returns `None` for an unknown id.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEntry,
    ) -> Result<Option<KnowledgeBaseEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE knowledge_base_entries SET \
             question = COALESCE($2, question), \
             answer = COALESCE($3, answer), \
             category = COALESCE($4, category), \
             tags = COALESCE($5, tags), \
             priority = COALESCE($6, priority) \
             WHERE id = $1 \
             RETURNING {ENTRY_COLUMNS}"
        );
        sqlx::query_as::<_, KnowledgeBaseEntry>(&query)
            .bind(id)
            .bind(input.question.as_deref())
            .bind(input.answer.as_deref())
            .bind(input.category.as_deref())
            .bind(input.tags.as_deref())
            .bind(input.priority)
            .fetch_optional(pool)
            .await
    }

    /// Delete an entry. Returns `false` for an unknown id.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM knowledge_base_entries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
