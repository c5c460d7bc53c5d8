use crate::domain::requests::pricing::CartItemRequest;
use shared::errors::ServiceError;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: i32,
    pub quantity: i32,
}

/// Folds repeated product ids into one line each, ordered by product id.
/// Storage locks products in this order.
pub fn merge_lines(items: &[CartItemRequest]) -> Result<Vec<CartLine>, ServiceError> {
    let mut merged: BTreeMap<i32, i32> = BTreeMap::new();
    for item in items {
        let quantity = merged.entry(item.product_id).or_default();
        *quantity = quantity.checked_add(item.quantity).ok_or_else(|| {
            ServiceError::Validation(vec![format!(
                "total quantity for productId {} is too large",
                item.product_id
            )])
        })?;
    }

    Ok(merged
        .into_iter()
        .map(|(product_id, quantity)| CartLine {
            product_id,
            quantity,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: i32, quantity: i32) -> CartItemRequest {
        CartItemRequest {
            product_id,
            quantity,
        }
    }

    #[test]
    fn duplicate_products_are_summed_and_sorted() {
        let lines = merge_lines(&[item(3, 5), item(1, 2), item(3, 10)]).unwrap();
        assert_eq!(
            lines,
            vec![
                CartLine {
                    product_id: 1,
                    quantity: 2
                },
                CartLine {
                    product_id: 3,
                    quantity: 15
                },
            ]
        );
    }

    #[test]
    fn overflowing_duplicate_lines_are_rejected() {
        let err = merge_lines(&[item(1, i32::MAX), item(1, 1)]).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref msgs) if msgs[0].contains("productId 1")));
    }
}
