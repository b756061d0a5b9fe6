//! Aggregation queries behind the financial summary endpoint.

use sqlx::PgPool;

use gamevault_core::types::{Cents, Timestamp};

use crate::models::financials::FinancialSummary;

/// Provides read-only revenue/cost aggregates.
pub struct FinancialRepo;

/// One aggregate pass per order family, then a cost-of-goods join for
/// purchases. Cancelled orders are excluded throughout; the window is
/// `[from, to)` on `created_at`.
impl FinancialRepo {
    pub async fn summary(
        pool: &PgPool,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    ) -> Result<FinancialSummary, sqlx::Error> {
        let (purchase_revenue, purchase_count) = sqlx::query_as::<_, (Cents, i64)>(
            "SELECT COALESCE(SUM(total), 0)::bigint, COUNT(*) FROM purchases \
             WHERE status <> 'cancelled' \
               AND ($1::timestamptz IS NULL OR created_at >= $1) \
               AND ($2::timestamptz IS NULL OR created_at < $2)",
        )
        .bind(from)
        .bind(to)
        .fetch_one(pool)
        .await?;

        let (rental_fee_revenue, deposits_held, rental_count) =
            sqlx::query_as::<_, (Cents, Cents, i64)>(
                "SELECT \
                 COALESCE(SUM(fee) FILTER (WHERE status <> 'cancelled'), 0)::bigint, \
                 COALESCE(SUM(deposit) FILTER (WHERE status IN ('active', 'overdue')), 0)::bigint, \
                 COUNT(*) FILTER (WHERE status <> 'cancelled') \
                 FROM rentals \
                 WHERE ($1::timestamptz IS NULL OR created_at >= $1) \
                   AND ($2::timestamptz IS NULL OR created_at < $2)",
            )
            .bind(from)
            .bind(to)
            .fetch_one(pool)
            .await?;

        let (trade_fee_revenue, trade_cash_collected, trade_count) =
            sqlx::query_as::<_, (Cents, Cents, i64)>(
                "SELECT \
                 COALESCE(SUM(trade_fee), 0)::bigint, \
                 COALESCE(SUM(cash_difference), 0)::bigint, \
                 COUNT(*) \
                 FROM trades \
                 WHERE status IN ('accepted', 'completed') \
                   AND ($1::timestamptz IS NULL OR created_at >= $1) \
                   AND ($2::timestamptz IS NULL OR created_at < $2)",
            )
            .bind(from)
            .bind(to)
            .fetch_one(pool)
            .await?;

        let cost_of_goods_sold = sqlx::query_scalar::<_, Cents>(
            "SELECT COALESCE(SUM(g.cost_price * pi.quantity), 0)::bigint \
             FROM purchase_items pi \
             JOIN purchases p ON p.id = pi.purchase_id \
             JOIN games g ON g.barcode = pi.barcode \
             WHERE p.status <> 'cancelled' \
               AND ($1::timestamptz IS NULL OR p.created_at >= $1) \
               AND ($2::timestamptz IS NULL OR p.created_at < $2)",
        )
        .bind(from)
        .bind(to)
        .fetch_one(pool)
        .await?;

        let gross_profit =
            purchase_revenue + rental_fee_revenue + trade_fee_revenue - cost_of_goods_sold;

        Ok(FinancialSummary {
            purchase_revenue,
            purchase_count,
            rental_fee_revenue,
            rental_count,
            deposits_held,
            trade_fee_revenue,
            trade_cash_collected,
            trade_count,
            cost_of_goods_sold,
            gross_profit,
        })
    }
}
