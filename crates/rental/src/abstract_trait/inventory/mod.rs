use crate::{
    domain::{
        date_range::DateRange,
        response::inventory::{AvailabilityResponse, DailyInventoryResponse},
    },
    model::inventory_date::InventoryDate,
};
use async_trait::async_trait;
use shared::errors::{RepositoryError, ServiceError};
use std::sync::Arc;

pub type DynInventoryRepository = Arc<dyn InventoryRepositoryTrait + Send + Sync>;
pub type DynAvailabilityService = Arc<dyn AvailabilityServiceTrait + Send + Sync>;

#[async_trait]
pub trait InventoryRepositoryTrait {
    /// Ledger rows inside `range`; `product_id = None` returns every product.
    async fn find_in_range(
        &self,
        product_id: Option<i32>,
        range: &DateRange,
    ) -> Result<Vec<InventoryDate>, RepositoryError>;
}

#[async_trait]
pub trait AvailabilityServiceTrait {
    async fn availability(&self, product_id: i32, range: &DateRange) -> Result<i32, ServiceError>;
    async fn availability_by_product(
        &self,
        range: &DateRange,
    ) -> Result<AvailabilityResponse, ServiceError>;
    async fn daily_inventory(
        &self,
        range: &DateRange,
    ) -> Result<DailyInventoryResponse, ServiceError>;
}
