use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Minimum free units per product over the requested range.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub stock_by_product: BTreeMap<i32, i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyStockResponse {
    pub date: String,
    pub stock_by_product: BTreeMap<i32, i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct DailyInventoryResponse {
    pub days: Vec<DailyStockResponse>,
}
