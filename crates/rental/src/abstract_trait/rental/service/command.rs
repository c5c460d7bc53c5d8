use crate::domain::{
    requests::rental::{CreateRentalRequest, UpdateRentalStatusRequest},
    response::{api::ApiResponse, rental::RentalResponse},
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynRentalCommandService = Arc<dyn RentalCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait RentalCommandServiceTrait {
    async fn create_rental(&self, req: &CreateRentalRequest)
    -> Result<RentalResponse, ServiceError>;
    async fn update_status(
        &self,
        rental_id: i32,
        req: &UpdateRentalStatusRequest,
    ) -> Result<ApiResponse<RentalResponse>, ServiceError>;
}
