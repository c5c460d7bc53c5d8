use crate::model::{
    rental::{Rental as RentalModel, RentalStatus},
    rental_item::RentalItem as RentalItemModel,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::utils::format_date;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RentalItemResponse {
    pub id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

impl From<RentalItemModel> for RentalItemResponse {
    fn from(value: RentalItemModel) -> Self {
        Self {
            id: value.rental_item_id,
            product_id: value.product_id,
            quantity: value.quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RentalResponse {
    pub id: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub phone_number: Option<String>,
    pub start_date: String,
    pub end_date: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 15.0)]
    pub total_amount: Decimal,
    pub status: RentalStatus,
    pub created_at: String,
    pub items: Vec<RentalItemResponse>,
}

impl RentalResponse {
    pub fn from_parts(rental: RentalModel, items: Vec<RentalItemModel>) -> Self {
        Self {
            id: rental.rental_id,
            customer_name: rental.customer_name,
            customer_email: rental.customer_email,
            phone_number: rental.phone_number,
            start_date: format_date(rental.start_date),
            end_date: format_date(rental.end_date),
            total_amount: rental.total_amount,
            status: rental.status,
            created_at: rental.created_at.to_string(),
            items: items.into_iter().map(RentalItemResponse::from).collect(),
        }
    }
}
