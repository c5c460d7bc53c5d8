use crate::{
    abstract_trait::rental::{
        repository::DynRentalQueryRepository, service::RentalQueryServiceTrait,
    },
    domain::{
        requests::rental::FindAllRentals,
        response::{
            api::{ApiResponse, ApiResponsePagination},
            impact::ImpactResponse,
            pagination::Pagination,
            rental::RentalResponse,
        },
    },
    model::{rental::Rental as RentalModel, rental_item::RentalItem as RentalItemModel},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, OperationTracer},
};
use std::collections::HashMap;
use tracing::info;

const MAX_PAGE_SIZE: i32 = 100;
const MAX_RECENT: i64 = 100;

#[derive(Clone)]
pub struct RentalQueryService {
    query: DynRentalQueryRepository,
    tracer: OperationTracer,
}

impl RentalQueryService {
    pub fn new(query: DynRentalQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "rental_query_service", "RentalQueryService");

        Self {
            query,
            tracer: OperationTracer::new("rental-query-service", metrics),
        }
    }

    async fn with_items(
        &self,
        rentals: Vec<RentalModel>,
    ) -> Result<Vec<RentalResponse>, ServiceError> {
        let ids: Vec<i32> = rentals.iter().map(|r| r.rental_id).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut items_by_rental: HashMap<i32, Vec<RentalItemModel>> = HashMap::new();
        for item in self.query.find_items_by_rentals(&ids).await? {
            items_by_rental.entry(item.rental_id).or_default().push(item);
        }

        Ok(rentals
            .into_iter()
            .map(|rental| {
                let items = items_by_rental
                    .remove(&rental.rental_id)
                    .unwrap_or_default();
                RentalResponse::from_parts(rental, items)
            })
            .collect())
    }
}

#[async_trait]
impl RentalQueryServiceTrait for RentalQueryService {
    async fn find_all(
        &self,
        req: &FindAllRentals,
    ) -> Result<ApiResponsePagination<Vec<RentalResponse>>, ServiceError> {
        let page = if req.page > 0 { req.page } else { 1 };
        let page_size = req.page_size.clamp(1, MAX_PAGE_SIZE);
        let method = Method::Get;

        let tracing_ctx = self.tracer.start(
            "rental_find_all",
            vec![
                KeyValue::new("component", "rental"),
                KeyValue::new("page", page.to_string()),
                KeyValue::new("page_size", page_size.to_string()),
            ],
        );

        let normalized = FindAllRentals {
            page,
            page_size,
            status: req.status,
        };

        let result = match self.query.find_all(&normalized).await {
            Ok((rentals, total)) => self
                .with_items(rentals)
                .await
                .map(|data| (data, total)),
            Err(e) => Err(ServiceError::Repo(e)),
        };

        match result {
            Ok((data, total)) => {
                info!("✅ Retrieved {} of {total} rentals", data.len());
                self.tracer
                    .complete_success(&tracing_ctx, method, "Rentals retrieved");
                Ok(ApiResponsePagination {
                    status: "success".into(),
                    message: "Rentals retrieved successfully".into(),
                    data,
                    pagination: Pagination::new(page, page_size, total),
                })
            }
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, &e.to_string());
                Err(e)
            }
        }
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<RentalResponse>, ServiceError> {
        let rental = self
            .query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Rental {id} not found")))?;

        let items = self.query.find_items_by_rentals(&[id]).await?;

        Ok(ApiResponse::success(
            "Rental retrieved successfully",
            RentalResponse::from_parts(rental, items),
        ))
    }

    async fn find_recent(
        &self,
        limit: i64,
    ) -> Result<ApiResponse<Vec<RentalResponse>>, ServiceError> {
        let limit = limit.clamp(1, MAX_RECENT);
        let rentals = self.query.find_recent(limit).await?;
        let data = self.with_items(rentals).await?;

        Ok(ApiResponse::success("Recent orders retrieved", data))
    }

    async fn impact(&self) -> Result<ImpactResponse, ServiceError> {
        let impact = self.query.impact().await?;

        Ok(ImpactResponse {
            total_co2_saved: impact.total_co2_saved,
            total_water_saved: impact.total_water_saved,
            rental_count: impact.rental_count,
            items_rented: impact.items_rented,
        })
    }
}
