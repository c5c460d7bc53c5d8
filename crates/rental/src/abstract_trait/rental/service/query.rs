use crate::domain::{
    requests::rental::FindAllRentals,
    response::{
        api::{ApiResponse, ApiResponsePagination},
        impact::ImpactResponse,
        rental::RentalResponse,
    },
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynRentalQueryService = Arc<dyn RentalQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait RentalQueryServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllRentals,
    ) -> Result<ApiResponsePagination<Vec<RentalResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<RentalResponse>, ServiceError>;
    async fn find_recent(
        &self,
        limit: i64,
    ) -> Result<ApiResponse<Vec<RentalResponse>>, ServiceError>;
    async fn impact(&self) -> Result<ImpactResponse, ServiceError>;
}
