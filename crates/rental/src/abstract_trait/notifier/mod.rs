use crate::domain::event::RentalEvent;
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynRentalNotifier = Arc<dyn RentalNotifierTrait + Send + Sync>;

#[async_trait]
pub trait RentalNotifierTrait {
    async fn notify(&self, event: &RentalEvent) -> Result<(), ServiceError>;
}
