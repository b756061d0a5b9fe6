pub mod conversation_repo;
pub mod financial_repo;
pub mod game_repo;
pub mod knowledge_base_repo;
pub mod purchase_repo;
pub mod rental_repo;
pub mod session_repo;
pub mod trade_repo;
pub mod user_repo;

pub use conversation_repo::ConversationRepo;
pub use financial_repo::FinancialRepo;
pub use game_repo::GameRepo;
pub use knowledge_base_repo::KnowledgeBaseRepo;
pub use purchase_repo::PurchaseRepo;
pub use rental_repo::RentalRepo;
pub use session_repo::SessionRepo;
pub use trade_repo::TradeRepo;
pub use user_repo::UserRepo;

/// Errors from order-creating repositories, which must fail atomically when
/// stock runs out mid-transaction.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Insufficient stock for {barcode} ({variant})")]
    InsufficientStock { barcode: String, variant: String },

    #[error("Unknown game: {barcode}")]
    UnknownGame { barcode: String },

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Clamp a client-supplied page size into 1..=`max`, defaulting to `default`.
pub(crate) fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, max)
}

/// Clamp a client-supplied offset to be non-negative.
pub(crate) fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
