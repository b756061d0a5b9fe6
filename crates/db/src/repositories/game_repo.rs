//! Repository for the `games` table.
//!
//! Catalog CRUD, list/search with filters and fixed sort orders, variant
//! stock adjustment helpers used inside checkout transactions, bulk price
//! application, and the one-shot legacy stock backfill.

use gamevault_core::cart::Variant;
use gamevault_core::pricing::{PriceChange, PricedItem};
use gamevault_core::types::Cents;
use sqlx::{PgConnection, PgPool, QueryBuilder};

use crate::models::game::{CreateGame, Game, GameListParams, UpdateGame};

/// Column list for `games` queries.
const GAME_COLUMNS: &str = "\
    id, barcode, title, description, price, sale_price, on_sale, cost_price, \
    stock_with_case, stock_cartridge_only, platforms, category, rating, \
    rentable, rental_base_fee, tradable, image_url, released_at, \
    created_at, updated_at";

/// Default page size for catalog listing.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for catalog listing.
const MAX_LIMIT: i64 = 200;

/// The stock column holding the given variant.
fn stock_column(variant: Variant) -> &'static str {
    match variant {
        Variant::WithCase => "stock_with_case",
        Variant::CartridgeOnly => "stock_cartridge_only",
    }
}

/// Provides catalog operations for game listings.
pub struct GameRepo;

impl GameRepo {
    /// Insert a new listing. A duplicate barcode violates `uq_games_barcode`.
    pub async fn create(pool: &PgPool, input: &CreateGame) -> Result<Game, sqlx::Error> {
        let query = format!(
            "INSERT INTO games (barcode, title, description, price, sale_price, on_sale, \
             cost_price, stock_with_case, stock_cartridge_only, platforms, category, rating, \
             rentable, rental_base_fee, tradable, image_url, released_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17) \
             RETURNING {GAME_COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(&input.barcode)
            .bind(&input.title)
            .bind(input.description.as_deref())
            .bind(input.price)
            .bind(input.sale_price)
            .bind(input.on_sale)
            .bind(input.cost_price)
            .bind(input.stock_with_case)
            .bind(input.stock_cartridge_only)
            .bind(&input.platforms)
            .bind(input.category.as_deref().unwrap_or("uncategorized"))
            .bind(input.rating)
            .bind(input.rentable)
            .bind(input.rental_base_fee)
            .bind(input.tradable)
            .bind(input.image_url.as_deref())
            .bind(input.released_at)
            .fetch_one(pool)
            .await
    }

    /// Find a listing by barcode.
    pub async fn find_by_barcode(
        pool: &PgPool,
        barcode: &str,
    ) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {GAME_COLUMNS} FROM games WHERE barcode = $1");
        sqlx::query_as::<_, Game>(&query)
            .bind(barcode)
            .fetch_optional(pool)
            .await
    }

    /// List/search the catalog with optional filters and a fixed sort order.
    pub async fn list(pool: &PgPool, params: &GameListParams) -> Result<Vec<Game>, sqlx::Error> {
        let limit = super::clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
        let offset = super::clamp_offset(params.offset);

        let mut qb: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new(format!("SELECT {GAME_COLUMNS} FROM games WHERE TRUE"));

        if let Some(q) = params.q.as_deref().filter(|q| !q.is_empty()) {
            qb.push(" AND (title ILIKE ")
                .push_bind(format!("%{q}%"))
                .push(" OR barcode = ")
                .push_bind(q.to_string())
                .push(")");
        }
        if let Some(category) = &params.category {
            qb.push(" AND category = ").push_bind(category.clone());
        }
        if let Some(platform) = &params.platform {
            qb.push(" AND ").push_bind(platform.clone()).push(" = ANY(platforms)");
        }
        if let Some(on_sale) = params.on_sale {
            qb.push(" AND on_sale = ").push_bind(on_sale);
        }
        if let Some(rentable) = params.rentable {
            qb.push(" AND rentable = ").push_bind(rentable);
        }
        if let Some(tradable) = params.tradable {
            qb.push(" AND tradable = ").push_bind(tradable);
        }
        if params.in_stock == Some(true) {
            qb.push(" AND (stock_with_case > 0 OR stock_cartridge_only > 0)");
        }

        qb.push(" ORDER BY ")
            .push(params.sort.order_clause())
            .push(" LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        qb.build_query_as::<Game>().fetch_all(pool).await
    }

    /// Partially update a listing. Nullable columns cannot be cleared
    /// through this path, only overwritten.
    ///
    /// Returns `None` if no listing with the given barcode exists.
    pub async fn update(
        pool: &PgPool,
        barcode: &str,
        input: &UpdateGame,
    ) -> Result<Option<Game>, sqlx::Error> {
        let query = format!(
            "UPDATE games SET \
             title = COALESCE($2, title), \
             description = COALESCE($3, description), \
             price = COALESCE($4, price), \
             sale_price = COALESCE($5, sale_price), \
             on_sale = COALESCE($6, on_sale), \
             cost_price = COALESCE($7, cost_price), \
             stock_with_case = COALESCE($8, stock_with_case), \
             stock_cartridge_only = COALESCE($9, stock_cartridge_only), \
             platforms = COALESCE($10, platforms), \
             category = COALESCE($11, category), \
             rating = COALESCE($12, rating), \
             rentable = COALESCE($13, rentable), \
             rental_base_fee = COALESCE($14, rental_base_fee), \
             tradable = COALESCE($15, tradable), \
             image_url = COALESCE($16, image_url), \
             released_at = COALESCE($17, released_at) \
             WHERE barcode = $1 \
             RETURNING {GAME_COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(barcode)
            .bind(input.title.as_deref())
            .bind(input.description.as_deref())
            .bind(input.price)
            .bind(input.sale_price)
            .bind(input.on_sale)
            .bind(input.cost_price)
            .bind(input.stock_with_case)
            .bind(input.stock_cartridge_only)
            .bind(input.platforms.as_deref())
            .bind(input.category.as_deref())
            .bind(input.rating)
            .bind(input.rentable)
            .bind(input.rental_base_fee)
            .bind(input.tradable)
            .bind(input.image_url.as_deref())
            .bind(input.released_at)
            .fetch_optional(pool)
            .await
    }

    /// Delete a listing. Returns `false` if the barcode was unknown.
    pub async fn delete(pool: &PgPool, barcode: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM games WHERE barcode = $1")
            .bind(barcode)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Stock adjustment (used inside checkout transactions)
    // -----------------------------------------------------------------------

    /// Decrement a variant's stock by `qty`, guarded so it never goes
    /// negative. Returns `false` when stock was insufficient (no write).
    pub async fn decrement_stock(
        conn: &mut PgConnection,
        barcode: &str,
        variant: Variant,
        qty: i32,
    ) -> Result<bool, sqlx::Error> {
        let col = stock_column(variant);
        let query = format!(
            "UPDATE games SET {col} = {col} - $2 WHERE barcode = $1 AND {col} >= $2"
        );
        let result = sqlx::query(&query)
            .bind(barcode)
            .bind(qty)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Increment a variant's stock by `qty`. Returns `false` when the
    /// barcode is not in the catalog.
    pub async fn increment_stock(
        conn: &mut PgConnection,
        barcode: &str,
        variant: Variant,
        qty: i32,
    ) -> Result<bool, sqlx::Error> {
        let col = stock_column(variant);
        let query = format!("UPDATE games SET {col} = {col} + $2 WHERE barcode = $1");
        let result = sqlx::query(&query)
            .bind(barcode)
            .bind(qty)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Bulk pricing
    // -----------------------------------------------------------------------

    /// Fetch pricing inputs for a set of barcodes: current price, cost, and
    /// combined variant stock. Order follows the `barcodes` slice; unknown
    /// barcodes are silently absent from the result.
    pub async fn fetch_pricing_inputs(
        pool: &PgPool,
        barcodes: &[String],
    ) -> Result<Vec<PricedItem>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (String, Cents, Cents, i64)>(
            "SELECT barcode, price, cost_price, \
             (stock_with_case + stock_cartridge_only)::BIGINT AS stock \
             FROM games WHERE barcode = ANY($1) \
             ORDER BY array_position($1, barcode)",
        )
        .bind(barcodes)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(barcode, price, cost_price, stock)| PricedItem {
                barcode,
                price,
                cost_price,
                stock,
            })
            .collect())
    }

    /// Apply pre-computed price changes in one transaction. Returns the
    /// number of rows written.
    pub async fn apply_price_changes(
        pool: &PgPool,
        changes: &[PriceChange],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut written = 0;

        for change in changes {
            let result = sqlx::query("UPDATE games SET price = $2 WHERE barcode = $1")
                .bind(&change.barcode)
                .bind(change.new_price)
                .execute(tx.as_mut())
                .await?;
            written += result.rows_affected();
        }

        tx.commit().await?;
        Ok(written)
    }

    // -----------------------------------------------------------------------
    // Legacy stock backfill
    // -----------------------------------------------------------------------

    /// Move the pre-variant `stock_legacy` count into `stock_with_case` for
    /// rows that have not been split yet. Idempotent: migrated rows end up
    /// with `stock_legacy = 0` and are skipped on re-runs.
    pub async fn migrate_legacy_stock(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE games \
             SET stock_with_case = stock_legacy, stock_legacy = 0 \
             WHERE stock_legacy > 0 \
               AND stock_with_case = 0 \
               AND stock_cartridge_only = 0",
        )
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
