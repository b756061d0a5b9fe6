//! Shared type aliases used across the workspace.

/// Database primary key (BIGSERIAL).
pub type DbId = i64;

/// UTC timestamp as stored in `created_at` / `updated_at` columns.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Money amount in integer cents.
pub type Cents = i64;
