use crate::{
    abstract_trait::inventory::DynAvailabilityService,
    domain::{
        date_range::DateRange,
        requests::inventory::AvailabilityQuery,
        response::inventory::{AvailabilityResponse, DailyInventoryResponse},
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/inventory/available",
    tag = "Inventory",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Minimum free units per product across the range", body = AvailabilityResponse),
        (status = 400, description = "Invalid or too large date range")
    )
)]
pub async fn get_available(
    Extension(service): Extension<DynAvailabilityService>,
    Query(params): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let range = DateRange::parse(&params.start_date, &params.end_date)?;
    let response = service.availability_by_product(&range).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/inventory/daily",
    tag = "Inventory",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Free units per product for every day of the range", body = DailyInventoryResponse),
        (status = 400, description = "Invalid or too large date range")
    )
)]
pub async fn get_daily(
    Extension(service): Extension<DynAvailabilityService>,
    Query(params): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let range = DateRange::parse(&params.start_date, &params.end_date)?;
    let response = service.daily_inventory(&range).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn inventory_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/inventory/available", get(get_available))
        .route("/api/inventory/daily", get(get_daily))
        .layer(Extension(app_state.di_container.availability_service.clone()))
}

