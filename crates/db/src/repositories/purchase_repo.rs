//! Repository for the `purchases` and `purchase_items` tables.

use sqlx::PgPool;

use gamevault_core::types::DbId;

use super::{GameRepo, OrderError};
use crate::models::purchase::{
    NewPurchase, PricedLine, Purchase, PurchaseItem, PurchaseWithItems,
};

/// Column list for `purchases` queries.
const PURCHASE_COLUMNS: &str = "\
    id, customer_name, customer_phone, delivery_address, delivery_method, \
    note, status, total, created_at, updated_at";

/// Column list for `purchase_items` queries.
const ITEM_COLUMNS: &str = "id, purchase_id, barcode, title, unit_price, quantity, variant";

/// Default page size for order listing.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for order listing.
const MAX_LIMIT: i64 = 200;

/// Provides operations for purchase orders.
pub struct PurchaseRepo;

impl PurchaseRepo {
    /// Create a purchase with its item snapshots and decrement variant
    /// stock, all in one transaction. Rolls back on the first line whose
    /// stock is insufficient.
    pub async fn create(
        pool: &PgPool,
        header: &NewPurchase,
        lines: &[PricedLine],
    ) -> Result<PurchaseWithItems, OrderError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO purchases (customer_name, customer_phone, delivery_address, \
             delivery_method, note, total) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {PURCHASE_COLUMNS}"
        );
        let purchase = sqlx::query_as::<_, Purchase>(&query)
            .bind(&header.customer_name)
            .bind(&header.customer_phone)
            .bind(&header.delivery_address)
            .bind(&header.delivery_method)
            .bind(header.note.as_deref())
            .bind(header.total)
            .fetch_one(tx.as_mut())
            .await?;

        let mut items = Vec::with_capacity(lines.len());
        for line in lines {
            let qty = line.quantity as i32;
            let taken =
                GameRepo::decrement_stock(tx.as_mut(), &line.barcode, line.variant, qty).await?;
            if !taken {
                return Err(OrderError::InsufficientStock {
                    barcode: line.barcode.clone(),
                    variant: line.variant.as_str().to_string(),
                });
            }

            let query = format!(
                "INSERT INTO purchase_items (purchase_id, barcode, title, unit_price, \
                 quantity, variant) \
                 VALUES ($1, $2, $3, $4, $5, $6) \
                 RETURNING {ITEM_COLUMNS}"
            );
            let item = sqlx::query_as::<_, PurchaseItem>(&query)
                .bind(purchase.id)
                .bind(&line.barcode)
                .bind(&line.title)
                .bind(line.unit_price)
                .bind(qty)
                .bind(line.variant.as_str())
                .fetch_one(tx.as_mut())
                .await?;
            items.push(item);
        }

        tx.commit().await?;
        Ok(PurchaseWithItems { purchase, items })
    }

    /// Find a purchase with its items.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PurchaseWithItems>, sqlx::Error> {
        let query = format!("SELECT {PURCHASE_COLUMNS} FROM purchases WHERE id = $1");
        let Some(purchase) = sqlx::query_as::<_, Purchase>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let query =
            format!("SELECT {ITEM_COLUMNS} FROM purchase_items WHERE purchase_id = $1 ORDER BY id");
        let items = sqlx::query_as::<_, PurchaseItem>(&query)
            .bind(id)
            .fetch_all(pool)
            .await?;

        Ok(Some(PurchaseWithItems { purchase, items }))
    }

    /// List purchases, newest first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Purchase>, sqlx::Error> {
        let limit = super::clamp_limit(limit, DEFAULT_LIMIT, MAX_LIMIT);
        let offset = super::clamp_offset(offset);

        match status {
            Some(status) => {
                let query = format!(
                    "SELECT {PURCHASE_COLUMNS} FROM purchases WHERE status = $1 \
                     ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
                );
                sqlx::query_as::<_, Purchase>(&query)
                    .bind(status)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {PURCHASE_COLUMNS} FROM purchases \
                     ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
                );
                sqlx::query_as::<_, Purchase>(&query)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Set a purchase's status. Returns `None` for an unknown id.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Purchase>, sqlx::Error> {
        let query = format!(
            "UPDATE purchases SET status = $2 WHERE id = $1 RETURNING {PURCHASE_COLUMNS}"
        );
        sqlx::query_as::<_, Purchase>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
