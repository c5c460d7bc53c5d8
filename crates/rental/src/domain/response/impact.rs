use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImpactResponse {
    pub total_co2_saved: f64,
    pub total_water_saved: f64,
    pub rental_count: i64,
    pub items_rented: i64,
}
