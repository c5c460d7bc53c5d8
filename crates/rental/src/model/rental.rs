use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Error)]
#[error("Unknown rental status: {0}")]
pub struct UnknownStatus(pub String);

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Pending => "pending",
            RentalStatus::Confirmed => "confirmed",
            RentalStatus::Cancelled => "cancelled",
        }
    }

    /// pending -> confirmed | cancelled, confirmed -> cancelled. Cancelled is terminal.
    pub fn can_transition_to(&self, next: RentalStatus) -> bool {
        matches!(
            (self, next),
            (RentalStatus::Pending, RentalStatus::Confirmed)
                | (RentalStatus::Pending, RentalStatus::Cancelled)
                | (RentalStatus::Confirmed, RentalStatus::Cancelled)
        )
    }
}

impl fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for RentalStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "pending" => Ok(RentalStatus::Pending),
            "confirmed" => Ok(RentalStatus::Confirmed),
            "cancelled" => Ok(RentalStatus::Cancelled),
            _ => Err(UnknownStatus(value)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rental {
    pub rental_id: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub phone_number: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_amount: Decimal,
    #[sqlx(try_from = "String")]
    pub status: RentalStatus,
    pub created_at: NaiveDateTime,
}
