//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

pub const RULE_SAVED_MESSAGE: &str = "Pricing structure created successfully";
pub const BAD_REQUEST_MESSAGE: &str = "Bad request";

/// Response for a successful price calculation
#[derive(Debug, Serialize, ToSchema)]
pub struct CalculatePriceResponse {
    pub success: bool,
    #[serde(with = "rust_decimal::serde::str")]
    #[schema(value_type = String, example = "20.50")]
    pub total_price: Decimal,
}

impl CalculatePriceResponse {
    pub fn new(total_price: Decimal) -> Self {
        Self {
            success: true,
            total_price,
        }
    }
}

/// Response for a successful create-or-update of a pricing rule
#[derive(Debug, Serialize, ToSchema)]
pub struct PricingRuleSavedResponse {
    pub success: bool,
    #[schema(example = "Pricing structure created successfully")]
    pub message: String,
    #[serde(
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub total_price: Option<Decimal>,
}

impl PricingRuleSavedResponse {
    pub fn new(total_price: Option<Decimal>) -> Self {
        Self {
            success: true,
            message: RULE_SAVED_MESSAGE.to_string(),
            total_price,
        }
    }
}

/// Uniform failure body for any pricing operation
#[derive(Debug, Serialize, ToSchema)]
pub struct PricingErrorResponse {
    pub success: bool,
    #[schema(example = "Organization not found")]
    pub error: String,
    #[schema(example = "Bad request")]
    pub message: String,
}

impl PricingErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: BAD_REQUEST_MESSAGE.to_string(),
        }
    }
}
