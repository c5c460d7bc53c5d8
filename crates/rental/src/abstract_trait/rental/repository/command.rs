use crate::{
    domain::{cart::CartLine, date_range::DateRange},
    model::{
        rental::{Rental as RentalModel, RentalStatus},
        rental_item::RentalItem as RentalItemModel,
    },
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::errors::RepositoryError;
use std::{sync::Arc, time::Duration};

pub type DynRentalCommandRepository = Arc<dyn RentalCommandRepositoryTrait + Send + Sync>;

#[derive(Debug, Clone)]
pub struct NewReservation {
    pub customer_name: String,
    pub customer_email: String,
    pub phone_number: Option<String>,
    pub range: DateRange,
    /// Merged and ordered by product id.
    pub lines: Vec<CartLine>,
    pub total_amount: Decimal,
    pub lock_timeout: Duration,
}

#[async_trait]
pub trait RentalCommandRepositoryTrait {
    /// Checks every line against the ledger and writes the rental, its items
    /// and the per-day decrements as one unit. Nothing is written when any
    /// line is short.
    async fn reserve(
        &self,
        req: &NewReservation,
    ) -> Result<(RentalModel, Vec<RentalItemModel>), RepositoryError>;

    /// Moves a rental to `status`. A transition to cancelled hands every
    /// reserved unit back to the ledger in the same unit of work.
    async fn update_status(
        &self,
        rental_id: i32,
        status: RentalStatus,
    ) -> Result<RentalModel, RepositoryError>;
}
