//! Request DTOs for pricing API endpoints.
//!
//! Every field arrives as raw JSON. Distances and prices may be numbers or
//! numeric strings, and presence and type checks belong to the service, so a
//! wrongly typed field still gets the pricing failure body.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Request to calculate a delivery price
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct CalculatePriceRequest {
    #[serde(default)]
    #[schema(example = "central")]
    pub zone: Option<Value>,
    #[serde(default)]
    #[schema(example = "6f1c2a8e-3d4b-4f6a-9c1e-2b7d8e9f0a1b")]
    pub organization_id: Option<Value>,
    /// Kilometres; a number or a numeric string.
    #[serde(default)]
    #[schema(example = 12)]
    pub total_distance: Option<Value>,
    /// `perishable` or `non-perishable`.
    #[serde(default)]
    #[schema(example = "perishable")]
    pub item_type: Option<Value>,
}

/// Request to create or update a pricing rule
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct CreatePricingRuleRequest {
    #[serde(default, rename = "organizationName")]
    #[schema(example = "Acme Foods")]
    pub organization_name: Option<Value>,
    #[serde(default)]
    #[schema(example = "central")]
    pub zone: Option<Value>,
    #[serde(default)]
    #[schema(example = "perishable")]
    pub item_type: Option<Value>,
    #[serde(default)]
    #[schema(example = "Fresh fish")]
    pub description: Option<Value>,
    #[serde(default)]
    pub base_distance_in_km: Option<Value>,
    #[serde(default)]
    pub km_price: Option<Value>,
    #[serde(default)]
    pub fix_price: Option<Value>,
}

/// Whether a raw value counts as absent.
///
/// `null`, `false`, numeric zero and the empty string are all treated as
/// missing. A string `"0"` is present.
pub fn value_is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64().map_or(false, |f| f == 0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => false,
    }
}

/// Interpret a raw value as a decimal number.
///
/// Numbers and numeric strings (surrounding whitespace allowed, scientific
/// notation accepted) convert; a blank string is zero and booleans are 1/0.
/// Anything else, or a value outside the decimal range, is not numeric.
pub fn numeric_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(Decimal::ZERO)
            } else {
                parse_decimal(trimmed)
            }
        }
        Value::Bool(true) => Some(Decimal::ONE),
        Value::Bool(false) | Value::Null => Some(Decimal::ZERO),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Text of a present value. Strings are taken as-is; any other value is
/// named by its JSON form, so `7` reads as `"7"`.
pub fn text_value(value: Option<Value>) -> String {
    match value {
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_value_is_missing() {
        assert!(value_is_missing(None));
        assert!(value_is_missing(Some(&json!(null))));
        assert!(value_is_missing(Some(&json!(false))));
        assert!(value_is_missing(Some(&json!(0))));
        assert!(value_is_missing(Some(&json!(0.0))));
        assert!(value_is_missing(Some(&json!(""))));

        assert!(!value_is_missing(Some(&json!("0"))));
        assert!(!value_is_missing(Some(&json!(12))));
        assert!(!value_is_missing(Some(&json!(-1))));
        assert!(!value_is_missing(Some(&json!("abc"))));
        assert!(!value_is_missing(Some(&json!([]))));
    }

    #[test]
    fn test_text_value() {
        assert_eq!(text_value(Some(json!("central"))), "central");
        assert_eq!(text_value(Some(json!(" "))), " ");
        assert_eq!(text_value(Some(json!(7))), "7");
        assert_eq!(text_value(Some(json!(true))), "true");
        assert_eq!(text_value(None), "");
    }

    #[test]
    fn test_numeric_value_numbers() {
        assert_eq!(numeric_value(&json!(12)), Some(dec!(12)));
        assert_eq!(numeric_value(&json!(1.5)), Some(dec!(1.5)));
        assert_eq!(numeric_value(&json!(-3.25)), Some(dec!(-3.25)));
        assert_eq!(numeric_value(&json!(1e3)), Some(dec!(1000)));
    }

    #[test]
    fn test_numeric_value_strings() {
        assert_eq!(numeric_value(&json!("12")), Some(dec!(12)));
        assert_eq!(numeric_value(&json!(" 7.5 ")), Some(dec!(7.5)));
        assert_eq!(numeric_value(&json!("2e1")), Some(dec!(20)));
        assert_eq!(numeric_value(&json!("  ")), Some(dec!(0)));
        assert_eq!(numeric_value(&json!("string")), None);
        assert_eq!(numeric_value(&json!("12km")), None);
    }

    #[test]
    fn test_numeric_value_other_types() {
        assert_eq!(numeric_value(&json!(true)), Some(dec!(1)));
        assert_eq!(numeric_value(&json!({"km": 3})), None);
        assert_eq!(numeric_value(&json!([1, 2])), None);
    }

    #[test]
    fn test_numeric_value_out_of_range() {
        assert_eq!(numeric_value(&json!(1e300)), None);
    }

    #[test]
    fn test_deserialize_create_request_field_names() {
        let req: CreatePricingRuleRequest = serde_json::from_value(json!({
            "organizationName": "Acme",
            "zone": "central",
            "item_type": "perishable",
            "description": "Fresh fish",
            "base_distance_in_km": 5,
            "km_price": "1.5",
            "fix_price": 10
        }))
        .unwrap();

        assert_eq!(req.organization_name, Some(json!("Acme")));
        assert_eq!(req.km_price, Some(json!("1.5")));
    }

    #[test]
    fn test_deserialize_keeps_wrongly_typed_text_fields() {
        let req: CalculatePriceRequest = serde_json::from_value(json!({
            "zone": 7,
            "item_type": false
        }))
        .unwrap();

        assert_eq!(req.zone, Some(json!(7)));
        assert_eq!(req.item_type, Some(json!(false)));

        let req: CreatePricingRuleRequest =
            serde_json::from_value(json!({ "organizationName": 0, "description": ["x"] })).unwrap();
        assert_eq!(req.organization_name, Some(json!(0)));
        assert_eq!(req.description, Some(json!(["x"])));
    }

    #[test]
    fn test_deserialize_calculate_request_defaults() {
        let req: CalculatePriceRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.zone.is_none());
        assert!(req.organization_id.is_none());

        let req: CalculatePriceRequest =
            serde_json::from_value(json!({ "organization_id": null })).unwrap();
        assert!(req.organization_id.is_none());
    }
}
