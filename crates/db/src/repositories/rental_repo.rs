//! Repository for the `rentals` and `rental_items` tables.
//!
//! Rented copies leave stock while the rental is active; marking a rental
//! `returned` or `cancelled` puts them back, in the same transaction as the
//! status change.

use sqlx::PgPool;

use gamevault_core::cart::Variant;
use gamevault_core::types::DbId;

use super::{GameRepo, OrderError};
use crate::models::purchase::PricedLine;
use crate::models::rental::{NewRental, Rental, RentalItem, RentalWithItems};

/// Column list for `rentals` queries.
const RENTAL_COLUMNS: &str = "\
    id, customer_name, customer_phone, delivery_address, days, plan, fee, \
    deposit, due_at, status, created_at, updated_at";

/// Column list for `rental_items` queries.
const ITEM_COLUMNS: &str = "id, rental_id, barcode, title, unit_price, variant";

/// Default page size for order listing.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for order listing.
const MAX_LIMIT: i64 = 200;

/// Statuses whose transition returns rented copies to stock.
const RESTOCKING_STATUSES: &[&str] = &["returned", "cancelled"];

/// Provides operations for rental orders.
pub struct RentalRepo;

impl RentalRepo {
    /// Create a rental with its item snapshots and decrement variant stock
    /// in one transaction. One copy per line: rentals have no quantities.
    pub async fn create(
        pool: &PgPool,
        header: &NewRental,
        lines: &[PricedLine],
    ) -> Result<RentalWithItems, OrderError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO rentals (customer_name, customer_phone, delivery_address, days, \
             plan, fee, deposit, due_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {RENTAL_COLUMNS}"
        );
        let rental = sqlx::query_as::<_, Rental>(&query)
            .bind(&header.customer_name)
            .bind(&header.customer_phone)
            .bind(&header.delivery_address)
            .bind(header.days)
            .bind(&header.plan)
            .bind(header.fee)
            .bind(header.deposit)
            .bind(header.due_at)
            .fetch_one(tx.as_mut())
            .await?;

        let mut items = Vec::with_capacity(lines.len());
        for line in lines {
            let taken =
                GameRepo::decrement_stock(tx.as_mut(), &line.barcode, line.variant, 1).await?;
            if !taken {
                return Err(OrderError::InsufficientStock {
                    barcode: line.barcode.clone(),
                    variant: line.variant.as_str().to_string(),
                });
            }

            let query = format!(
                "INSERT INTO rental_items (rental_id, barcode, title, unit_price, variant) \
                 VALUES ($1, $2, $3, $4, $5) \
                 RETURNING {ITEM_COLUMNS}"
            );
            let item = sqlx::query_as::<_, RentalItem>(&query)
                .bind(rental.id)
                .bind(&line.barcode)
                .bind(&line.title)
                .bind(line.unit_price)
                .bind(line.variant.as_str())
                .fetch_one(tx.as_mut())
                .await?;
            items.push(item);
        }

        tx.commit().await?;
        Ok(RentalWithItems { rental, items })
    }

    /// Find a rental with its items.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RentalWithItems>, sqlx::Error> {
        let query = format!("SELECT {RENTAL_COLUMNS} FROM rentals WHERE id = $1");
        let Some(rental) = sqlx::query_as::<_, Rental>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let query =
            format!("SELECT {ITEM_COLUMNS} FROM rental_items WHERE rental_id = $1 ORDER BY id");
        let items = sqlx::query_as::<_, RentalItem>(&query)
            .bind(id)
            .fetch_all(pool)
            .await?;

        Ok(Some(RentalWithItems { rental, items }))
    }

    /// List rentals, newest first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Rental>, sqlx::Error> {
        let limit = super::clamp_limit(limit, DEFAULT_LIMIT, MAX_LIMIT);
        let offset = super::clamp_offset(offset);

        match status {
            Some(status) => {
                let query = format!(
                    "SELECT {RENTAL_COLUMNS} FROM rentals WHERE status = $1 \
                     ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
                );
                sqlx::query_as::<_, Rental>(&query)
                    .bind(status)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {RENTAL_COLUMNS} FROM rentals \
                     ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
                );
                sqlx::query_as::<_, Rental>(&query)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Set a rental's status, returning rented copies to stock when the
    /// rental ends. Returns `None` for an unknown id.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Rental>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(previous) = sqlx::query_scalar::<_, String>(
            "SELECT status FROM rentals WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(tx.as_mut())
        .await?
        else {
            tx.rollback().await?;
            return Ok(None);
        };

        let query =
            format!("UPDATE rentals SET status = $2 WHERE id = $1 RETURNING {RENTAL_COLUMNS}");
        let rental = sqlx::query_as::<_, Rental>(&query)
            .bind(id)
            .bind(status)
            .fetch_one(tx.as_mut())
            .await?;

        // Restock exactly once: only on the transition out of an open state.
        let was_open = previous == "active" || previous == "overdue";
        if was_open && RESTOCKING_STATUSES.contains(&status) {
            let query =
                format!("SELECT {ITEM_COLUMNS} FROM rental_items WHERE rental_id = $1 ORDER BY id");
            let items = sqlx::query_as::<_, RentalItem>(&query)
                .bind(id)
                .fetch_all(tx.as_mut())
                .await?;
            for item in &items {
                let variant = match item.variant.as_str() {
                    "withCase" => Variant::WithCase,
                    _ => Variant::CartridgeOnly,
                };
                GameRepo::increment_stock(tx.as_mut(), &item.barcode, variant, 1).await?;
            }
        }

        tx.commit().await?;
        Ok(Some(rental))
    }
}
