//! Game catalog models and DTOs.

use gamevault_core::types::{Cents, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `games` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Game {
    pub id: DbId,
    pub barcode: String,
    pub title: String,
    pub description: Option<String>,
    pub price: Cents,
    pub sale_price: Option<Cents>,
    pub on_sale: bool,
    pub cost_price: Cents,
    pub stock_with_case: i32,
    pub stock_cartridge_only: i32,
    pub platforms: Vec<String>,
    pub category: String,
    pub rating: f64,
    pub rentable: bool,
    pub rental_base_fee: Option<Cents>,
    pub tradable: bool,
    pub image_url: Option<String>,
    pub released_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Game {
    /// The price a buyer pays right now: sale price while `on_sale`.
    pub fn effective_price(&self) -> Cents {
        match (self.on_sale, self.sale_price) {
            (true, Some(sale)) => sale,
            _ => self.price,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for `POST /api/games`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGame {
    pub barcode: String,
    pub title: String,
    pub description: Option<String>,
    pub price: Cents,
    pub sale_price: Option<Cents>,
    #[serde(default)]
    pub on_sale: bool,
    #[serde(default)]
    pub cost_price: Cents,
    #[serde(default)]
    pub stock_with_case: i32,
    #[serde(default)]
    pub stock_cartridge_only: i32,
    #[serde(default)]
    pub platforms: Vec<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub rentable: bool,
    pub rental_base_fee: Option<Cents>,
    #[serde(default)]
    pub tradable: bool,
    pub image_url: Option<String>,
    pub released_at: Option<Timestamp>,
}

/// DTO for `PUT /api/games/{barcode}`. Only provided fields change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGame {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Cents>,
    pub sale_price: Option<Cents>,
    pub on_sale: Option<bool>,
    pub cost_price: Option<Cents>,
    pub stock_with_case: Option<i32>,
    pub stock_cartridge_only: Option<i32>,
    pub platforms: Option<Vec<String>>,
    pub category: Option<String>,
    pub rating: Option<f64>,
    pub rentable: Option<bool>,
    pub rental_base_fee: Option<Cents>,
    pub tradable: Option<bool>,
    pub image_url: Option<String>,
    pub released_at: Option<Timestamp>,
}

/// Sort orders accepted by `GET /api/games`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    Title,
    Rating,
}

impl GameSort {
    /// The ORDER BY clause for this sort. Fixed strings only, never
    /// interpolated user input.
    pub fn order_clause(self) -> &'static str {
        match self {
            Self::Newest => "created_at DESC, id DESC",
            Self::PriceAsc => "price ASC, id",
            Self::PriceDesc => "price DESC, id",
            Self::Title => "title ASC, id",
            Self::Rating => "rating DESC, id",
        }
    }
}

/// Query parameters for `GET /api/games`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameListParams {
    /// Case-insensitive substring match on title or exact barcode.
    pub q: Option<String>,
    pub category: Option<String>,
    pub platform: Option<String>,
    pub on_sale: Option<bool>,
    pub rentable: Option<bool>,
    pub tradable: Option<bool>,
    /// Only listings with stock in at least one variant.
    pub in_stock: Option<bool>,
    #[serde(default)]
    pub sort: GameSort,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// DTO for `PUT /api/games/bulk-update`.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkPriceUpdate {
    pub barcodes: Vec<String>,
    pub percent: f64,
    /// When true, return the preview without writing anything.
    #[serde(default)]
    pub dry_run: bool,
}

/// Result of the legacy stock backfill.
#[derive(Debug, Clone, Serialize)]
pub struct StockMigrationResult {
    pub games_migrated: u64,
}
