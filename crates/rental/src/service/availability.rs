use crate::{
    abstract_trait::{
        inventory::{AvailabilityServiceTrait, DynInventoryRepository},
        product::DynProductQueryRepository,
    },
    domain::{
        date_range::DateRange,
        ledger::LedgerView,
        response::inventory::{AvailabilityResponse, DailyInventoryResponse, DailyStockResponse},
    },
    model::inventory_date::InventoryDate,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, OperationTracer, format_date},
};
use std::collections::{BTreeMap, HashMap};

#[derive(Clone)]
pub struct AvailabilityService {
    products: DynProductQueryRepository,
    inventory: DynInventoryRepository,
    tracer: OperationTracer,
}

impl AvailabilityService {
    pub fn new(
        products: DynProductQueryRepository,
        inventory: DynInventoryRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "availability_service", "AvailabilityService");

        Self {
            products,
            inventory,
            tracer: OperationTracer::new("availability-service", metrics),
        }
    }

    /// One ledger view per catalogue product for the given range.
    async fn views(&self, range: &DateRange) -> Result<BTreeMap<i32, LedgerView>, ServiceError> {
        let products = self.products.find_all().await?;
        let rows = self.inventory.find_in_range(None, range).await?;

        let mut overrides: HashMap<i32, Vec<(NaiveDate, i32)>> = HashMap::new();
        for InventoryDate {
            date,
            product_id,
            available_stock,
        } in rows
        {
            overrides
                .entry(product_id)
                .or_default()
                .push((date, available_stock));
        }

        Ok(products
            .into_iter()
            .map(|p| {
                let rows = overrides.remove(&p.product_id).unwrap_or_default();
                (p.product_id, LedgerView::new(p.total_stock, rows))
            })
            .collect())
    }

    fn range_attributes(operation: &'static str, range: &DateRange) -> Vec<KeyValue> {
        vec![
            KeyValue::new("component", "inventory"),
            KeyValue::new("operation", operation),
            KeyValue::new("range.start", format_date(range.start())),
            KeyValue::new("range.end", format_date(range.end())),
        ]
    }
}

#[async_trait]
impl AvailabilityServiceTrait for AvailabilityService {
    async fn availability(&self, product_id: i32, range: &DateRange) -> Result<i32, ServiceError> {
        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {product_id} not found")))?;

        let rows = self
            .inventory
            .find_in_range(Some(product_id), range)
            .await?;

        let view = LedgerView::new(
            product.total_stock,
            rows.into_iter().map(|r| (r.date, r.available_stock)),
        );

        Ok(view.min_across(range))
    }

    async fn availability_by_product(
        &self,
        range: &DateRange,
    ) -> Result<AvailabilityResponse, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self
            .tracer
            .start("availability", Self::range_attributes("available", range));

        match self.views(range).await {
            Ok(views) => {
                let stock_by_product = views
                    .into_iter()
                    .map(|(id, view)| (id, view.min_across(range)))
                    .collect();

                self.tracer
                    .complete_success(&tracing_ctx, method, "Availability resolved");
                Ok(AvailabilityResponse { stock_by_product })
            }
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, &e.to_string());
                Err(e)
            }
        }
    }

    async fn daily_inventory(
        &self,
        range: &DateRange,
    ) -> Result<DailyInventoryResponse, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self
            .tracer
            .start("daily_inventory", Self::range_attributes("daily", range));

        match self.views(range).await {
            Ok(views) => {
                let days = range
                    .days()
                    .map(|day| DailyStockResponse {
                        date: format_date(day),
                        stock_by_product: views
                            .iter()
                            .map(|(id, view)| (*id, view.available_on(day)))
                            .collect(),
                    })
                    .collect();

                self.tracer
                    .complete_success(&tracing_ctx, method, "Daily inventory resolved");
                Ok(DailyInventoryResponse { days })
            }
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, &e.to_string());
                Err(e)
            }
        }
    }
}
