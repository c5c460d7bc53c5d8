use crate::domain::{requests::pricing::CalculatePriceRequest, response::pricing::PriceResponse};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynPricingService = Arc<dyn PricingServiceTrait + Send + Sync>;

#[async_trait]
pub trait PricingServiceTrait {
    async fn calculate_price(
        &self,
        req: &CalculatePriceRequest,
    ) -> Result<PriceResponse, ServiceError>;
}
