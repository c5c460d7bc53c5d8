use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One ledger override: the remaining stock of a product on a single day.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InventoryDate {
    pub date: NaiveDate,
    pub product_id: i32,
    pub available_stock: i32,
}
