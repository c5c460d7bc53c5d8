use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Plates,
    Glasses,
    Cutlery,
}

#[derive(Debug, Error)]
#[error("Unknown product category: {0}")]
pub struct UnknownCategory(pub String);

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Plates => "plates",
            ProductCategory::Glasses => "glasses",
            ProductCategory::Cutlery => "cutlery",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ProductCategory {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "plates" => Ok(ProductCategory::Plates),
            "glasses" => Ok(ProductCategory::Glasses),
            "cutlery" => Ok(ProductCategory::Cutlery),
            _ => Err(UnknownCategory(value)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub product_id: i32,
    pub name: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub category: ProductCategory,
    pub total_stock: i32,
    pub co2_saved: f64,
    pub water_saved: f64,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Catalogue entry inserted at startup when no product of that name exists.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: &'static str,
    pub description: &'static str,
    pub category: ProductCategory,
    pub total_stock: i32,
    pub co2_saved: f64,
    pub water_saved: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_its_own_display_form() {
        for category in [
            ProductCategory::Plates,
            ProductCategory::Glasses,
            ProductCategory::Cutlery,
        ] {
            let parsed = ProductCategory::try_from(category.to_string()).unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = ProductCategory::try_from("bowls".to_string()).unwrap_err();
        assert_eq!(err.0, "bowls");
    }
}
