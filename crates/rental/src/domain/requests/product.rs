use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[schema(example = 120)]
    pub total_stock: Option<i32>,

    #[validate(range(min = 0.0, message = "co2Saved cannot be negative"))]
    #[schema(example = 0.35)]
    pub co2_saved: Option<f64>,

    #[validate(range(min = 0.0, message = "waterSaved cannot be negative"))]
    #[schema(example = 1.2)]
    pub water_saved: Option<f64>,
}
