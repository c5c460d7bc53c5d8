use super::RENTAL_COLUMNS;
use crate::{
    abstract_trait::rental::repository::RentalQueryRepositoryTrait,
    domain::requests::rental::FindAllRentals,
    model::{
        impact::RentalImpact, rental::Rental as RentalModel,
        rental_item::RentalItem as RentalItemModel,
    },
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct RentalQueryRepository {
    db: ConnectionPool,
}

impl RentalQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RentalQueryRepositoryTrait for RentalQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllRentals,
    ) -> Result<(Vec<RentalModel>, i64), RepositoryError> {
        info!(
            "🔍 Fetching rentals page={} size={} status={:?}",
            req.page, req.page_size, req.status
        );

        let limit = req.page_size as i64;
        let offset = (i64::from(req.page) - 1).max(0).saturating_mul(limit);
        let status = req.status.map(|s| s.as_str());

        let sql = format!(
            r#"
            SELECT {RENTAL_COLUMNS}
            FROM rentals
            WHERE ($1::TEXT IS NULL OR status = $1)
            ORDER BY created_at DESC, rental_id DESC
            LIMIT $2 OFFSET $3
            "#
        );

        let rentals = sqlx::query_as::<_, RentalModel>(&sql)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch rentals: {e:?}");
                RepositoryError::from(e)
            })?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM rentals WHERE ($1::TEXT IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.db)
        .await
        .map_err(RepositoryError::from)?;

        Ok((rentals, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<RentalModel>, RepositoryError> {
        let sql = format!("SELECT {RENTAL_COLUMNS} FROM rentals WHERE rental_id = $1");

        sqlx::query_as::<_, RentalModel>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch rental {id}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn find_recent(&self, limit: i64) -> Result<Vec<RentalModel>, RepositoryError> {
        let sql = format!(
            "SELECT {RENTAL_COLUMNS} FROM rentals ORDER BY created_at DESC, rental_id DESC LIMIT $1"
        );

        sqlx::query_as::<_, RentalModel>(&sql)
            .bind(limit)
            .fetch_all(&self.db)
            .await
            .map_err(RepositoryError::from)
    }

    async fn find_items_by_rentals(
        &self,
        rental_ids: &[i32],
    ) -> Result<Vec<RentalItemModel>, RepositoryError> {
        sqlx::query_as::<_, RentalItemModel>(
            r#"
            SELECT rental_item_id, rental_id, product_id, quantity
            FROM rental_items
            WHERE rental_id = ANY($1)
            ORDER BY rental_id, product_id
            "#,
        )
        .bind(rental_ids)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch items for rentals {rental_ids:?}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn impact(&self) -> Result<RentalImpact, RepositoryError> {
        sqlx::query_as::<_, RentalImpact>(
            r#"
            SELECT
                COALESCE(SUM(ri.quantity * p.co2_saved), 0)::DOUBLE PRECISION AS total_co2_saved,
                COALESCE(SUM(ri.quantity * p.water_saved), 0)::DOUBLE PRECISION AS total_water_saved,
                COUNT(DISTINCT r.rental_id) AS rental_count,
                COALESCE(SUM(ri.quantity), 0)::BIGINT AS items_rented
            FROM rentals r
            JOIN rental_items ri ON ri.rental_id = r.rental_id
            JOIN products p ON p.product_id = ri.product_id
            WHERE r.status <> 'cancelled'
            "#,
        )
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to aggregate impact: {e:?}");
            RepositoryError::from(e)
        })
    }
}
