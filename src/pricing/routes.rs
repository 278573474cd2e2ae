//! Pricing API routes.
//!
//! JSON endpoints mounted under `/api/pricing`.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use utoipa::OpenApi;

use crate::error::AppError;
use crate::AppState;

use super::requests::{CalculatePriceRequest, CreatePricingRuleRequest};
use super::responses::{CalculatePriceResponse, PricingErrorResponse, PricingRuleSavedResponse};
use super::services::PricingError;

/// OpenAPI description of the pricing endpoints
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Delivery pricing API",
        description = "Delivery fee calculation and pricing rule maintenance"
    ),
    paths(calculate_price, create_entry),
    components(schemas(
        CalculatePriceRequest,
        CreatePricingRuleRequest,
        CalculatePriceResponse,
        PricingRuleSavedResponse,
        PricingErrorResponse
    )),
    tags((name = "pricing", description = "Delivery pricing"))
)]
pub struct PricingApi;

/// Build the pricing router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calculate-price", post(calculate_price))
        .route("/create-entry", post(create_entry))
}

impl IntoResponse for PricingError {
    fn into_response(self) -> Response {
        match &self {
            PricingError::Store(e) => tracing::error!("Pricing store error: {}", e),
            other => tracing::debug!("Pricing request rejected: {}", other),
        }

        (
            StatusCode::BAD_REQUEST,
            Json(PricingErrorResponse::new(self.to_string())),
        )
            .into_response()
    }
}

/// POST /calculate-price
#[utoipa::path(
    post,
    path = "/api/pricing/calculate-price",
    tag = "pricing",
    request_body = CalculatePriceRequest,
    responses(
        (status = 200, description = "Delivery price", body = CalculatePriceResponse),
        (status = 400, description = "Invalid input or no matching pricing data", body = PricingErrorResponse)
    )
)]
async fn calculate_price(
    State(state): State<AppState>,
    payload: Result<Json<CalculatePriceRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;

    let response = match state.pricing.calculate_price(request).await {
        Ok(quote) => (
            StatusCode::OK,
            Json(CalculatePriceResponse::new(quote.total_price)),
        )
            .into_response(),
        Err(e) => e.into_response(),
    };

    Ok(response)
}

/// POST /create-entry
#[utoipa::path(
    post,
    path = "/api/pricing/create-entry",
    tag = "pricing",
    request_body = CreatePricingRuleRequest,
    responses(
        (status = 200, description = "Pricing rule created or updated", body = PricingRuleSavedResponse),
        (status = 400, description = "Invalid input or store failure", body = PricingErrorResponse)
    )
)]
async fn create_entry(
    State(state): State<AppState>,
    payload: Result<Json<CreatePricingRuleRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;

    let response = match state.pricing.create_or_update_pricing_rule(request).await {
        // The upsert has no trip distance, so there is no total to report.
        Ok(_rule) => (StatusCode::OK, Json(PricingRuleSavedResponse::new(None))).into_response(),
        Err(e) => e.into_response(),
    };

    Ok(response)
}
