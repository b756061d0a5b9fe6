//! Repository for the `trades` and `trade_items` tables.
//!
//! Stock timing: `received` items (leaving store stock) are reserved when
//! the trade is submitted; `given` items (hand-ins) only enter stock when
//! the trade completes; rejecting or cancelling a trade returns the
//! reserved copies.

use sqlx::{PgConnection, PgPool};

use gamevault_core::cart::Variant;
use gamevault_core::types::DbId;

use super::{GameRepo, OrderError};
use crate::models::trade::{NewTrade, PricedTradeItem, Trade, TradeDirection, TradeItem, TradeWithItems};

/// Column list for `trades` queries.
const TRADE_COLUMNS: &str = "\
    id, customer_name, customer_phone, given_total, received_total, \
    cash_difference, trade_fee, kind, status, created_at, updated_at";

/// Column list for `trade_items` queries.
const ITEM_COLUMNS: &str = "id, trade_id, barcode, title, value, direction, variant";

/// Default page size for order listing.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for order listing.
const MAX_LIMIT: i64 = 200;

fn parse_variant(s: &str) -> Variant {
    match s {
        "withCase" => Variant::WithCase,
        _ => Variant::CartridgeOnly,
    }
}

/// Provides operations for trade orders.
pub struct TradeRepo;

impl TradeRepo {
    /// Create a trade, reserving stock for every `received` line in the
    /// same transaction.
    pub async fn create(
        pool: &PgPool,
        header: &NewTrade,
        items: &[PricedTradeItem],
    ) -> Result<TradeWithItems, OrderError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO trades (customer_name, customer_phone, given_total, received_total, \
             cash_difference, trade_fee, kind) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {TRADE_COLUMNS}"
        );
        let trade = sqlx::query_as::<_, Trade>(&query)
            .bind(&header.customer_name)
            .bind(&header.customer_phone)
            .bind(header.given_total)
            .bind(header.received_total)
            .bind(header.cash_difference)
            .bind(header.trade_fee)
            .bind(&header.kind)
            .fetch_one(tx.as_mut())
            .await?;

        let mut rows = Vec::with_capacity(items.len());
        for item in items {
            if item.direction == TradeDirection::Received {
                let barcode = item.barcode.as_deref().ok_or_else(|| {
                    OrderError::UnknownGame {
                        barcode: item.title.clone(),
                    }
                })?;
                let taken =
                    GameRepo::decrement_stock(tx.as_mut(), barcode, item.variant, 1).await?;
                if !taken {
                    return Err(OrderError::InsufficientStock {
                        barcode: barcode.to_string(),
                        variant: item.variant.as_str().to_string(),
                    });
                }
            }

            let query = format!(
                "INSERT INTO trade_items (trade_id, barcode, title, value, direction, variant) \
                 VALUES ($1, $2, $3, $4, $5, $6) \
                 RETURNING {ITEM_COLUMNS}"
            );
            let row = sqlx::query_as::<_, TradeItem>(&query)
                .bind(trade.id)
                .bind(item.barcode.as_deref())
                .bind(&item.title)
                .bind(item.value)
                .bind(item.direction.as_str())
                .bind(item.variant.as_str())
                .fetch_one(tx.as_mut())
                .await?;
            rows.push(row);
        }

        tx.commit().await?;
        Ok(TradeWithItems { trade, items: rows })
    }

    /// Find a trade with its items.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TradeWithItems>, sqlx::Error> {
        let query = format!("SELECT {TRADE_COLUMNS} FROM trades WHERE id = $1");
        let Some(trade) = sqlx::query_as::<_, Trade>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let items = Self::items(pool, id).await?;
        Ok(Some(TradeWithItems { trade, items }))
    }

    async fn items(pool: &PgPool, trade_id: DbId) -> Result<Vec<TradeItem>, sqlx::Error> {
        let query =
            format!("SELECT {ITEM_COLUMNS} FROM trade_items WHERE trade_id = $1 ORDER BY id");
        sqlx::query_as::<_, TradeItem>(&query)
            .bind(trade_id)
            .fetch_all(pool)
            .await
    }

    /// List trades, newest first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Trade>, sqlx::Error> {
        let limit = super::clamp_limit(limit, DEFAULT_LIMIT, MAX_LIMIT);
        let offset = super::clamp_offset(offset);

        match status {
            Some(status) => {
                let query = format!(
                    "SELECT {TRADE_COLUMNS} FROM trades WHERE status = $1 \
                     ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
                );
                sqlx::query_as::<_, Trade>(&query)
                    .bind(status)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {TRADE_COLUMNS} FROM trades \
                     ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
                );
                sqlx::query_as::<_, Trade>(&query)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Set a trade's status, applying the stock effects of the transition.
    /// Returns `None` for an unknown id.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Trade>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(previous) = sqlx::query_scalar::<_, String>(
            "SELECT status FROM trades WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(tx.as_mut())
        .await?
        else {
            tx.rollback().await?;
            return Ok(None);
        };

        let query =
            format!("UPDATE trades SET status = $2 WHERE id = $1 RETURNING {TRADE_COLUMNS}");
        let trade = sqlx::query_as::<_, Trade>(&query)
            .bind(id)
            .bind(status)
            .fetch_one(tx.as_mut())
            .await?;

        let was_open = previous == "pending" || previous == "accepted";
        match status {
            // Hand-ins with a known barcode enter stock on completion.
            "completed" if was_open => {
                Self::apply_item_stock(tx.as_mut(), id, TradeDirection::Given, 1).await?;
            }
            // Reserved outgoing copies return to stock on rejection/cancel.
            "rejected" | "cancelled" if was_open => {
                Self::apply_item_stock(tx.as_mut(), id, TradeDirection::Received, 1).await?;
            }
            _ => {}
        }

        tx.commit().await?;
        Ok(Some(trade))
    }

    /// Increment stock for every item of `direction` on the trade.
    async fn apply_item_stock(
        conn: &mut PgConnection,
        trade_id: DbId,
        direction: TradeDirection,
        qty: i32,
    ) -> Result<(), sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM trade_items WHERE trade_id = $1 AND direction = $2"
        );
        let items = sqlx::query_as::<_, TradeItem>(&query)
            .bind(trade_id)
            .bind(direction.as_str())
            .fetch_all(&mut *conn)
            .await?;

        for item in &items {
            if let Some(barcode) = item.barcode.as_deref() {
                GameRepo::increment_stock(&mut *conn, barcode, parse_variant(&item.variant), qty)
                    .await?;
            }
        }
        Ok(())
    }
}
