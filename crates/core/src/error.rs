use std::borrow::Cow;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Entities are addressed by barcode as well as numeric id, so the key
    /// is carried as a string.
    #[error("Entity not found: {entity} {key}")]
    NotFound {
        entity: &'static str,
        key: Cow<'static, str>,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] with an owned key.
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity,
            key: Cow::Owned(key.into()),
        }
    }
}
