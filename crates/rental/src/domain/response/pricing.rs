use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 15.0)]
    pub total_amount: Decimal,
}
