use crate::{
    abstract_trait::{
        notifier::DynRentalNotifier,
        product::DynProductQueryRepository,
        rental::{
            repository::{DynRentalCommandRepository, DynRentalQueryRepository, NewReservation},
            service::RentalCommandServiceTrait,
        },
    },
    domain::{
        cart::merge_lines,
        date_range::DateRange,
        event::RentalEvent,
        requests::rental::{CreateRentalRequest, UpdateRentalStatusRequest},
        response::{api::ApiResponse, rental::RentalResponse},
    },
    model::{
        rental::{Rental as RentalModel, RentalStatus},
        rental_item::RentalItem as RentalItemModel,
    },
    service::pricing::{load_cart_products, price_cart, validate_cart},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, OperationTracer, format_date},
};
use std::time::Duration;
use tracing::{error, info, warn};

pub struct RentalCommandServiceDeps {
    pub products: DynProductQueryRepository,
    pub command: DynRentalCommandRepository,
    pub query: DynRentalQueryRepository,
    pub notifier: DynRentalNotifier,
    pub reservation_timeout: Duration,
}

#[derive(Clone)]
pub struct RentalCommandService {
    products: DynProductQueryRepository,
    command: DynRentalCommandRepository,
    query: DynRentalQueryRepository,
    notifier: DynRentalNotifier,
    reservation_timeout: Duration,
    tracer: OperationTracer,
}

impl RentalCommandService {
    pub fn new(deps: RentalCommandServiceDeps, registry: &mut Registry) -> Self {
        let RentalCommandServiceDeps {
            products,
            command,
            query,
            notifier,
            reservation_timeout,
        } = deps;

        let metrics = Metrics::new();
        metrics.register(registry, "rental_command_service", "RentalCommandService");

        Self {
            products,
            command,
            query,
            notifier,
            reservation_timeout,
            tracer: OperationTracer::new("rental-command-service", metrics),
        }
    }

    /// Runs the storage transaction, retrying exactly once when storage
    /// reports a lock or serialization conflict.
    async fn reserve_with_retry(
        &self,
        req: &NewReservation,
    ) -> Result<(RentalModel, Vec<RentalItemModel>), RepositoryError> {
        match self.command.reserve(req).await {
            Err(e) if e.is_conflict() => {
                warn!("🔁 Reservation conflict, retrying once: {e}");
                self.command.reserve(req).await
            }
            other => other,
        }
    }

    async fn reserve(&self, req: &CreateRentalRequest) -> Result<RentalResponse, ServiceError> {
        let range = DateRange::parse(&req.start_date, &req.end_date)?;
        let lines = merge_lines(&req.items)?;
        validate_cart(&lines)?;

        let products = load_cart_products(&self.products, &lines).await?;
        let total_amount = price_cart(&lines, &products)?;

        let reservation = NewReservation {
            customer_name: req.customer_name.trim().to_string(),
            customer_email: req.customer_email.trim().to_string(),
            phone_number: req
                .phone_number
                .as_ref()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            range,
            lines,
            total_amount,
            lock_timeout: self.reservation_timeout,
        };

        let outcome =
            tokio::time::timeout(self.reservation_timeout, self.reserve_with_retry(&reservation))
                .await
                .map_err(|_| ServiceError::Timeout(self.reservation_timeout.as_secs()))?;

        let (rental, items) = outcome.map_err(|e| match e {
            RepositoryError::InsufficientStock {
                product_id,
                requested,
                available,
            } => ServiceError::InsufficientStock {
                product_id,
                requested,
                available,
            },
            RepositoryError::Conflict(msg) => ServiceError::Conflict(msg),
            RepositoryError::NotFound => {
                ServiceError::Validation(vec!["Cart references an unknown product".into()])
            }
            other => ServiceError::Repo(other),
        })?;

        Ok(RentalResponse::from_parts(rental, items))
    }

    fn publish(&self, event: RentalEvent) {
        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.notify(&event).await {
                error!(
                    "❌ Failed to notify {} for rental {}: {e}",
                    event.topic(),
                    event.rental_id()
                );
            }
        });
    }
}

#[async_trait]
impl RentalCommandServiceTrait for RentalCommandService {
    async fn create_rental(
        &self,
        req: &CreateRentalRequest,
    ) -> Result<RentalResponse, ServiceError> {
        let method = Method::Post;
        info!(
            "🏗️ Reserving {} lines for {} ({}..{})",
            req.items.len(),
            req.customer_email,
            req.start_date,
            req.end_date
        );

        let tracing_ctx = self.tracer.start(
            "create_rental",
            vec![
                KeyValue::new("component", "rental"),
                KeyValue::new("operation", "create"),
                KeyValue::new("rental.items", req.items.len() as i64),
                KeyValue::new("rental.start_date", req.start_date.clone()),
                KeyValue::new("rental.end_date", req.end_date.clone()),
            ],
        );

        match self.reserve(req).await {
            Ok(response) => {
                self.tracer
                    .complete_success(&tracing_ctx, method, "Rental reserved");
                self.publish(RentalEvent::from(&response));
                Ok(response)
            }
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, &e.to_string());
                Err(e)
            }
        }
    }

    async fn update_status(
        &self,
        rental_id: i32,
        req: &UpdateRentalStatusRequest,
    ) -> Result<ApiResponse<RentalResponse>, ServiceError> {
        let method = Method::Patch;
        let tracing_ctx = self.tracer.start(
            "update_rental_status",
            vec![
                KeyValue::new("component", "rental"),
                KeyValue::new("rental.id", rental_id.to_string()),
                KeyValue::new("rental.status", req.status.as_str()),
            ],
        );

        let rental = match self.command.update_status(rental_id, req.status).await {
            Ok(rental) => rental,
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, &e.to_string());
                return Err(match e {
                    RepositoryError::NotFound => {
                        ServiceError::NotFound(format!("Rental {rental_id} not found"))
                    }
                    RepositoryError::InvalidTransition { from, to } => {
                        ServiceError::InvalidTransition(format!("{from} -> {to}"))
                    }
                    RepositoryError::Conflict(msg) => ServiceError::Conflict(msg),
                    other => ServiceError::Repo(other),
                });
            }
        };

        let items = self.query.find_items_by_rentals(&[rental_id]).await?;

        self.tracer
            .complete_success(&tracing_ctx, method, "Rental status updated");

        if rental.status == RentalStatus::Cancelled {
            self.publish(RentalEvent::Cancelled { rental_id });
        }

        info!(
            "✅ Rental {rental_id} is now {} ({}..{})",
            rental.status,
            format_date(rental.start_date),
            format_date(rental.end_date)
        );

        Ok(ApiResponse::success(
            "Rental status updated",
            RentalResponse::from_parts(rental, items),
        ))
    }
}
