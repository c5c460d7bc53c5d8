use crate::{
    abstract_trait::{pricing::PricingServiceTrait, product::DynProductQueryRepository},
    domain::{
        cart::{CartLine, merge_lines},
        requests::pricing::{CalculatePriceRequest, CartItemRequest},
        response::pricing::PriceResponse,
    },
    model::product::{Product as ProductModel, ProductCategory},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use rust_decimal::Decimal;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, OperationTracer},
};
use std::collections::HashMap;
use tracing::info;

/// A category whose summed quantity exceeds this switches the cart to the bulk fee.
pub const BULK_THRESHOLD: i64 = 50;
pub const STANDARD_FEE: Decimal = Decimal::from_parts(15, 0, 0, false, 0);
pub const BULK_FEE: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Flat fee for a cart: quantities are summed per category and any category
/// above [`BULK_THRESHOLD`] makes the whole cart [`BULK_FEE`].
pub fn price_cart(
    lines: &[CartLine],
    products: &HashMap<i32, ProductModel>,
) -> Result<Decimal, ServiceError> {
    let mut by_category: HashMap<ProductCategory, i64> = HashMap::new();

    for line in lines {
        let product = products.get(&line.product_id).ok_or_else(|| {
            ServiceError::Validation(vec![format!("Unknown productId {}", line.product_id)])
        })?;
        *by_category.entry(product.category).or_default() += line.quantity as i64;
    }

    let bulk = by_category.values().any(|qty| *qty > BULK_THRESHOLD);
    Ok(if bulk { BULK_FEE } else { STANDARD_FEE })
}

/// Loads the catalogue rows a cart refers to, rejecting unknown ids.
pub(crate) async fn load_cart_products(
    repo: &DynProductQueryRepository,
    lines: &[CartLine],
) -> Result<HashMap<i32, ProductModel>, ServiceError> {
    let ids: Vec<i32> = lines.iter().map(|line| line.product_id).collect();

    let products: HashMap<i32, ProductModel> = repo
        .find_by_ids(&ids)
        .await?
        .into_iter()
        .map(|p| (p.product_id, p))
        .collect();

    let missing: Vec<String> = ids
        .iter()
        .filter(|id| !products.contains_key(id))
        .map(|id| format!("Unknown productId {id}"))
        .collect();

    if !missing.is_empty() {
        return Err(ServiceError::Validation(missing));
    }

    Ok(products)
}

pub(crate) fn validate_cart(lines: &[CartLine]) -> Result<(), ServiceError> {
    if lines.is_empty() {
        return Err(ServiceError::Validation(vec!["Cart is empty".into()]));
    }

    let errors: Vec<String> = lines
        .iter()
        .filter(|line| line.quantity < 1)
        .map(|line| format!("quantity for productId {} must be at least 1", line.product_id))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(errors))
    }
}

#[derive(Clone)]
pub struct PricingService {
    products: DynProductQueryRepository,
    tracer: OperationTracer,
}

impl PricingService {
    pub fn new(products: DynProductQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "pricing_service", "PricingService");

        Self {
            products,
            tracer: OperationTracer::new("pricing-service", metrics),
        }
    }

    async fn quote(&self, items: &[CartItemRequest]) -> Result<Decimal, ServiceError> {
        let lines = merge_lines(items)?;
        validate_cart(&lines)?;
        let products = load_cart_products(&self.products, &lines).await?;
        price_cart(&lines, &products)
    }
}

#[async_trait]
impl PricingServiceTrait for PricingService {
    async fn calculate_price(
        &self,
        req: &CalculatePriceRequest,
    ) -> Result<PriceResponse, ServiceError> {
        let method = Method::Post;
        let tracing_ctx = self.tracer.start(
            "calculate_price",
            vec![
                KeyValue::new("component", "pricing"),
                KeyValue::new("items", req.items.len() as i64),
            ],
        );

        match self.quote(&req.items).await {
            Ok(total_amount) => {
                info!("💰 Cart of {} items priced at {total_amount}", req.items.len());
                self.tracer
                    .complete_success(&tracing_ctx, method, "Price calculated");
                Ok(PriceResponse { total_amount })
            }
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, &e.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn product(id: i32, category: ProductCategory) -> ProductModel {
        ProductModel {
            product_id: id,
            name: format!("product-{id}"),
            description: String::new(),
            category,
            total_stock: 1000,
            co2_saved: 0.0,
            water_saved: 0.0,
            created_at: None,
            updated_at: None,
        }
    }

    fn catalogue() -> HashMap<i32, ProductModel> {
        [
            product(1, ProductCategory::Plates),
            product(2, ProductCategory::Glasses),
            product(3, ProductCategory::Plates),
        ]
        .into_iter()
        .map(|p| (p.product_id, p))
        .collect()
    }

    fn line(product_id: i32, quantity: i32) -> CartLine {
        CartLine {
            product_id,
            quantity,
        }
    }

    #[test]
    fn small_cart_pays_standard_fee() {
        let total = price_cart(&[line(1, 40)], &catalogue()).unwrap();
        assert_eq!(total, dec!(15));
    }

    #[test]
    fn large_category_pays_bulk_fee() {
        let total = price_cart(&[line(1, 60)], &catalogue()).unwrap();
        assert_eq!(total, dec!(30));
    }

    #[test]
    fn exactly_fifty_is_not_bulk() {
        let total = price_cart(&[line(1, 50)], &catalogue()).unwrap();
        assert_eq!(total, dec!(15));
    }

    #[test]
    fn categories_are_not_summed_together() {
        let total = price_cart(&[line(1, 30), line(2, 30)], &catalogue()).unwrap();
        assert_eq!(total, dec!(15));
    }

    #[test]
    fn same_category_lines_are_summed() {
        let total = price_cart(&[line(1, 30), line(3, 30)], &catalogue()).unwrap();
        assert_eq!(total, dec!(30));
    }

    #[test]
    fn unknown_product_is_a_validation_error() {
        let err = price_cart(&[line(99, 1)], &catalogue()).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn empty_cart_fails_validation() {
        assert!(matches!(
            validate_cart(&[]),
            Err(ServiceError::Validation(_))
        ));
    }

    proptest! {
        #[test]
        fn fee_is_one_of_two_tiers(plates in 1i32..200, glasses in 1i32..200) {
            let total = price_cart(&[line(1, plates), line(2, glasses)], &catalogue()).unwrap();
            let expected = if plates > 50 || glasses > 50 { dec!(30) } else { dec!(15) };
            prop_assert_eq!(total, expected);
        }
    }
}
