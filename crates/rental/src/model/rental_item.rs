use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RentalItem {
    pub rental_item_id: i32,
    pub rental_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}
