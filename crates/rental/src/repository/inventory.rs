use crate::{
    abstract_trait::inventory::InventoryRepositoryTrait, domain::date_range::DateRange,
    model::inventory_date::InventoryDate,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::error;

#[derive(Clone)]
pub struct InventoryRepository {
    db: ConnectionPool,
}

impl InventoryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InventoryRepositoryTrait for InventoryRepository {
    async fn find_in_range(
        &self,
        product_id: Option<i32>,
        range: &DateRange,
    ) -> Result<Vec<InventoryDate>, RepositoryError> {
        sqlx::query_as::<_, InventoryDate>(
            r#"
            SELECT date, product_id, available_stock
            FROM inventory_dates
            WHERE date BETWEEN $1 AND $2
              AND ($3::INTEGER IS NULL OR product_id = $3)
            ORDER BY date, product_id
            "#,
        )
        .bind(range.start())
        .bind(range.end())
        .bind(product_id)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!(
                "❌ Failed to read ledger {}..{} for {product_id:?}: {e:?}",
                range.start(),
                range.end()
            );
            RepositoryError::from(e)
        })
    }
}
