use crate::{
    abstract_trait::pricing::DynPricingService,
    domain::{requests::pricing::CalculatePriceRequest, response::pricing::PriceResponse},
    middleware::validate::SimpleValidatedJson,
    state::AppState,
};
use axum::{
    Json, extract::Extension, http::StatusCode, response::IntoResponse, routing::post,
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/calculate-price",
    tag = "Pricing",
    request_body = CalculatePriceRequest,
    responses(
        (status = 200, description = "Flat fee for the cart", body = PriceResponse),
        (status = 400, description = "Empty cart or unknown product")
    )
)]
pub async fn calculate_price(
    Extension(service): Extension<DynPricingService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CalculatePriceRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.calculate_price(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn pricing_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/calculate-price", post(calculate_price))
        .layer(Extension(app_state.di_container.pricing_service.clone()))
}
