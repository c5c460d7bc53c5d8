use crate::{domain::requests::pricing::CartItemRequest, model::rental::RentalStatus};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRentalRequest {
    #[validate(length(min = 1, max = 255, message = "customerName is required"))]
    #[schema(example = "Ada Lovelace")]
    pub customer_name: String,

    #[validate(email(message = "customerEmail must be a valid email"))]
    #[schema(example = "ada@example.com")]
    pub customer_email: String,

    #[validate(length(max = 50))]
    #[serde(default)]
    pub phone_number: Option<String>,

    #[validate(length(min = 1, message = "Cart is empty"), nested)]
    pub items: Vec<CartItemRequest>,

    #[schema(example = "2025-06-01")]
    pub start_date: String,

    #[schema(example = "2025-06-03")]
    pub end_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateRentalStatusRequest {
    pub status: RentalStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct FindAllRentals {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,

    #[serde(default)]
    pub status: Option<RentalStatus>,
}

impl Default for FindAllRentals {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            status: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct RecentOrdersQuery {
    #[serde(default = "default_recent_limit")]
    pub limit: i64,
}

fn default_page() -> i32 {
    1
}

fn default_page_size() -> i32 {
    10
}

fn default_recent_limit() -> i64 {
    10
}
