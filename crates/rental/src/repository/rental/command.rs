use super::RENTAL_COLUMNS;
use crate::{
    abstract_trait::rental::repository::{NewReservation, RentalCommandRepositoryTrait},
    domain::{date_range::DateRange, ledger::LedgerView},
    model::{
        rental::{Rental as RentalModel, RentalStatus},
        rental_item::RentalItem as RentalItemModel,
    },
};
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::{Postgres, Transaction};
use std::time::Duration;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct RentalCommandRepository {
    db: ConnectionPool,
    lock_timeout: Duration,
}

impl RentalCommandRepository {
    pub fn new(db: ConnectionPool, lock_timeout: Duration) -> Self {
        Self { db, lock_timeout }
    }

    async fn begin(
        &self,
        lock_timeout: Duration,
    ) -> Result<Transaction<'static, Postgres>, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        // SET does not take bind parameters
        let statement = format!("SET LOCAL lock_timeout = '{}ms'", lock_timeout.as_millis());
        sqlx::query(&statement)
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::from)?;

        Ok(tx)
    }

    async fn lock_product_stock(
        tx: &mut Transaction<'_, Postgres>,
        product_id: i32,
    ) -> Result<i32, RepositoryError> {
        sqlx::query_scalar::<_, i32>(
            "SELECT total_stock FROM products WHERE product_id = $1 FOR UPDATE",
        )
        .bind(product_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(RepositoryError::from)?
        .ok_or(RepositoryError::NotFound)
    }

    async fn ledger_view(
        tx: &mut Transaction<'_, Postgres>,
        product_id: i32,
        total_stock: i32,
        range: &DateRange,
    ) -> Result<LedgerView, RepositoryError> {
        let overrides = sqlx::query_as::<_, (NaiveDate, i32)>(
            r#"
            SELECT date, available_stock
            FROM inventory_dates
            WHERE product_id = $1 AND date BETWEEN $2 AND $3
            "#,
        )
        .bind(product_id)
        .bind(range.start())
        .bind(range.end())
        .fetch_all(&mut **tx)
        .await
        .map_err(RepositoryError::from)?;

        Ok(LedgerView::new(total_stock, overrides))
    }
}

#[async_trait]
impl RentalCommandRepositoryTrait for RentalCommandRepository {
    async fn reserve(
        &self,
        req: &NewReservation,
    ) -> Result<(RentalModel, Vec<RentalItemModel>), RepositoryError> {
        let mut tx = self.begin(req.lock_timeout).await?;

        let mut stock_by_line = Vec::with_capacity(req.lines.len());

        for line in &req.lines {
            let total_stock = Self::lock_product_stock(&mut tx, line.product_id).await?;
            let available = Self::ledger_view(&mut tx, line.product_id, total_stock, &req.range)
                .await?
                .min_across(&req.range);

            if line.quantity > available {
                warn!(
                    "🚫 Product {} short: requested={}, available={available}",
                    line.product_id, line.quantity
                );
                if let Err(e) = tx.rollback().await {
                    warn!("⚠️ Rollback after stock shortfall failed: {e:?}");
                }
                return Err(RepositoryError::InsufficientStock {
                    product_id: line.product_id,
                    requested: line.quantity,
                    available,
                });
            }

            stock_by_line.push((line, total_stock));
        }

        let sql = format!(
            r#"
            INSERT INTO rentals
                (customer_name, customer_email, phone_number, start_date, end_date, total_amount, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'pending')
            RETURNING {RENTAL_COLUMNS}
            "#
        );

        let rental = sqlx::query_as::<_, RentalModel>(&sql)
            .bind(&req.customer_name)
            .bind(&req.customer_email)
            .bind(&req.phone_number)
            .bind(req.range.start())
            .bind(req.range.end())
            .bind(req.total_amount)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                error!("❌ Failed to insert rental: {e:?}");
                RepositoryError::from(e)
            })?;

        let mut items = Vec::with_capacity(stock_by_line.len());

        for (line, total_stock) in stock_by_line {
            let item = sqlx::query_as::<_, RentalItemModel>(
                r#"
                INSERT INTO rental_items (rental_id, product_id, quantity)
                VALUES ($1, $2, $3)
                RETURNING rental_item_id, rental_id, product_id, quantity
                "#,
            )
            .bind(rental.rental_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .fetch_one(&mut *tx)
            .await
            .map_err(RepositoryError::from)?;

            // absent day: seed from catalogue stock; present day: relative decrement
            sqlx::query(
                r#"
                INSERT INTO inventory_dates (date, product_id, available_stock)
                SELECT day::date, $1, $2
                FROM generate_series($3::date, $4::date, INTERVAL '1 day') AS day
                ON CONFLICT (date, product_id)
                DO UPDATE SET available_stock = inventory_dates.available_stock - $5
                "#,
            )
            .bind(line.product_id)
            .bind(total_stock - line.quantity)
            .bind(req.range.start())
            .bind(req.range.end())
            .bind(line.quantity)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!(
                    "❌ Failed to decrement ledger for product {}: {e:?}",
                    line.product_id
                );
                RepositoryError::from(e)
            })?;

            items.push(item);
        }

        tx.commit().await.map_err(RepositoryError::from)?;

        info!(
            "✅ Reserved rental {} ({} lines, {}..{})",
            rental.rental_id,
            items.len(),
            req.range.start(),
            req.range.end()
        );

        Ok((rental, items))
    }

    async fn update_status(
        &self,
        rental_id: i32,
        status: RentalStatus,
    ) -> Result<RentalModel, RepositoryError> {
        let mut tx = self.begin(self.lock_timeout).await?;

        let sql = format!("SELECT {RENTAL_COLUMNS} FROM rentals WHERE rental_id = $1 FOR UPDATE");
        let current = sqlx::query_as::<_, RentalModel>(&sql)
            .bind(rental_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(RepositoryError::from)?
            .ok_or(RepositoryError::NotFound)?;

        if !current.status.can_transition_to(status) {
            if let Err(e) = tx.rollback().await {
                warn!("⚠️ Rollback after rejected transition failed: {e:?}");
            }
            return Err(RepositoryError::InvalidTransition {
                from: current.status.to_string(),
                to: status.to_string(),
            });
        }

        if status == RentalStatus::Cancelled {
            let items = sqlx::query_as::<_, RentalItemModel>(
                r#"
                SELECT rental_item_id, rental_id, product_id, quantity
                FROM rental_items
                WHERE rental_id = $1
                ORDER BY product_id
                "#,
            )
            .bind(rental_id)
            .fetch_all(&mut *tx)
            .await
            .map_err(RepositoryError::from)?;

            for item in &items {
                Self::lock_product_stock(&mut tx, item.product_id).await?;

                sqlx::query(
                    r#"
                    UPDATE inventory_dates
                    SET available_stock = available_stock + $2
                    WHERE product_id = $1 AND date BETWEEN $3 AND $4
                    "#,
                )
                .bind(item.product_id)
                .bind(item.quantity)
                .bind(current.start_date)
                .bind(current.end_date)
                .execute(&mut *tx)
                .await
                .map_err(RepositoryError::from)?;
            }

            info!(
                "↩️ Restored {} lines of rental {rental_id} to the ledger",
                items.len()
            );
        }

        let sql = format!(
            "UPDATE rentals SET status = $2 WHERE rental_id = $1 RETURNING {RENTAL_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, RentalModel>(&sql)
            .bind(rental_id)
            .bind(status.as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(RepositoryError::from)?;

        tx.commit().await.map_err(RepositoryError::from)?;

        info!("🔄 Rental {rental_id}: {} -> {}", current.status, updated.status);
        Ok(updated)
    }
}
