use crate::domain::response::rental::RentalResponse;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RentalItemEvent {
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum RentalEvent {
    Created {
        rental_id: i32,
        customer_name: String,
        customer_email: String,
        phone_number: Option<String>,
        start_date: String,
        end_date: String,
        #[serde(with = "rust_decimal::serde::float")]
        total_amount: Decimal,
        items: Vec<RentalItemEvent>,
    },
    Cancelled {
        rental_id: i32,
    },
}

impl RentalEvent {
    pub fn topic(&self) -> &'static str {
        match self {
            RentalEvent::Created { .. } => "rental.created",
            RentalEvent::Cancelled { .. } => "rental.cancelled",
        }
    }

    pub fn rental_id(&self) -> i32 {
        match self {
            RentalEvent::Created { rental_id, .. } | RentalEvent::Cancelled { rental_id } => {
                *rental_id
            }
        }
    }
}

impl From<&RentalResponse> for RentalEvent {
    fn from(rental: &RentalResponse) -> Self {
        RentalEvent::Created {
            rental_id: rental.id,
            customer_name: rental.customer_name.clone(),
            customer_email: rental.customer_email.clone(),
            phone_number: rental.phone_number.clone(),
            start_date: rental.start_date.clone(),
            end_date: rental.end_date.clone(),
            total_amount: rental.total_amount,
            items: rental
                .items
                .iter()
                .map(|item| RentalItemEvent {
                    product_id: item.product_id,
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_tagged_by_type() {
        let event = RentalEvent::Cancelled { rental_id: 9 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "Cancelled");
        assert_eq!(json["rental_id"], 9);
        assert_eq!(event.topic(), "rental.cancelled");
    }
}
