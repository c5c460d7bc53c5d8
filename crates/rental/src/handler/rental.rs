use crate::{
    abstract_trait::rental::service::{DynRentalCommandService, DynRentalQueryService},
    domain::{
        requests::rental::{
            CreateRentalRequest, FindAllRentals, RecentOrdersQuery, UpdateRentalStatusRequest,
        },
        response::{
            api::{ApiResponse, ApiResponsePagination},
            impact::ImpactResponse,
            rental::RentalResponse,
        },
    },
    middleware::{
        admin::{AdminGuard, admin_middleware},
        validate::SimpleValidatedJson,
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, patch, post},
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/rentals",
    tag = "Rental",
    request_body = CreateRentalRequest,
    responses(
        (status = 201, description = "Rental reserved", body = RentalResponse),
        (status = 400, description = "Validation error, invalid dates or insufficient stock"),
        (status = 503, description = "Reservation conflicted or timed out"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_rental(
    Extension(service): Extension<DynRentalCommandService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateRentalRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let rental = service.create_rental(&body).await?;
    Ok((StatusCode::CREATED, Json(rental)))
}

#[utoipa::path(
    get,
    path = "/api/rentals",
    tag = "Rental",
    security(("admin_token" = [])),
    params(FindAllRentals),
    responses(
        (status = 200, description = "Paginated rentals", body = ApiResponsePagination<Vec<RentalResponse>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_rentals(
    Extension(service): Extension<DynRentalQueryService>,
    Query(params): Query<FindAllRentals>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/rentals/{id}",
    tag = "Rental",
    security(("admin_token" = [])),
    params(("id" = i32, Path, description = "Rental ID")),
    responses(
        (status = 200, description = "Rental with its items", body = ApiResponse<RentalResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Rental not found")
    )
)]
pub async fn get_rental(
    Extension(service): Extension<DynRentalQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/api/rentals/{id}/status",
    tag = "Rental",
    security(("admin_token" = [])),
    params(("id" = i32, Path, description = "Rental ID")),
    request_body = UpdateRentalStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<RentalResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Rental not found"),
        (status = 409, description = "Transition not allowed")
    )
)]
pub async fn update_rental_status(
    Extension(service): Extension<DynRentalCommandService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateRentalStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_status(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/recent",
    tag = "Rental",
    security(("admin_token" = [])),
    params(RecentOrdersQuery),
    responses(
        (status = 200, description = "Most recent rentals first", body = ApiResponse<Vec<RentalResponse>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_recent_orders(
    Extension(service): Extension<DynRentalQueryService>,
    Query(params): Query<RecentOrdersQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_recent(params.limit).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/impact",
    tag = "Rental",
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Environmental savings of all non-cancelled rentals", body = ImpactResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_impact(
    Extension(service): Extension<DynRentalQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.impact().await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn rental_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let admin = OpenApiRouter::new()
        .route("/api/rentals", get(get_rentals))
        .route("/api/rentals/{id}", get(get_rental))
        .route("/api/rentals/{id}/status", patch(update_rental_status))
        .route("/api/orders/recent", get(get_recent_orders))
        .route("/api/impact", get(get_impact))
        .route_layer(middleware::from_fn(admin_middleware))
        .layer(Extension::<AdminGuard>(app_state.admin.clone()));

    OpenApiRouter::new()
        .route("/api/rentals", post(create_rental))
        .merge(admin)
        .layer(Extension(app_state.di_container.rental_command.clone()))
        .layer(Extension(app_state.di_container.rental_query.clone()))
}
