use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct RentalImpact {
    pub total_co2_saved: f64,
    pub total_water_saved: f64,
    pub rental_count: i64,
    pub items_rented: i64,
}
