use serde::{Deserialize, Serialize};

/// Largest quantity a single cart line may ask for.
pub const MAX_LINE_QUANTITY: i32 = 1_000_000;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRequest {
    #[validate(range(min = 1, message = "productId must be positive"))]
    #[schema(example = 1)]
    pub product_id: i32,

    #[validate(range(
        min = 1,
        max = MAX_LINE_QUANTITY,
        message = "quantity must be between 1 and 1000000"
    ))]
    #[schema(example = 30)]
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CalculatePriceRequest {
    #[validate(length(min = 1, message = "Cart is empty"), nested)]
    pub items: Vec<CartItemRequest>,
}
