use crate::{
    domain::requests::rental::FindAllRentals,
    model::{
        impact::RentalImpact, rental::Rental as RentalModel,
        rental_item::RentalItem as RentalItemModel,
    },
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynRentalQueryRepository = Arc<dyn RentalQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait RentalQueryRepositoryTrait {
    async fn find_all(
        &self,
        req: &FindAllRentals,
    ) -> Result<(Vec<RentalModel>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<RentalModel>, RepositoryError>;
    async fn find_recent(&self, limit: i64) -> Result<Vec<RentalModel>, RepositoryError>;
    async fn find_items_by_rentals(
        &self,
        rental_ids: &[i32],
    ) -> Result<Vec<RentalItemModel>, RepositoryError>;
    async fn impact(&self) -> Result<RentalImpact, RepositoryError>;
}
