//! Database models for delivery pricing.
//!
//! These models use sqlx's FromRow derive for direct database deserialization.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Classification of a delivered item. Maps to the `item_type` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "item_type", rename_all = "kebab-case")]
pub enum ItemType {
    Perishable,
    NonPerishable,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Perishable => "perishable",
            ItemType::NonPerishable => "non-perishable",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is neither `perishable` nor `non-perishable`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown item type: {0}")]
pub struct UnknownItemType(pub String);

impl FromStr for ItemType {
    type Err = UnknownItemType;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "perishable" => Ok(ItemType::Perishable),
            "non-perishable" => Ok(ItemType::NonPerishable),
            other => Err(UnknownItemType(other.to_string())),
        }
    }
}

/// Organization from organizations
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
}

/// Item from items
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Item {
    pub id: Uuid,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub description: String,
}

/// PricingRule from pricing_rules
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct PricingRule {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub item_id: Uuid,
    pub zone: String,
    pub base_distance_in_km: Decimal,
    pub km_price: Decimal,
    pub fix_price: Decimal,
}

impl PricingRule {
    pub fn terms(&self) -> RuleTerms {
        RuleTerms {
            base_distance_in_km: self.base_distance_in_km,
            km_price: self.km_price,
            fix_price: self.fix_price,
        }
    }
}

/// The three numeric fields of a rule; the part overwritten on update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleTerms {
    pub base_distance_in_km: Decimal,
    pub km_price: Decimal,
    pub fix_price: Decimal,
}

/// Fields for inserting a new pricing rule
#[derive(Debug, Clone)]
pub struct NewPricingRule {
    pub organization_id: Uuid,
    pub item_id: Uuid,
    pub zone: String,
    pub terms: RuleTerms,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_item_type_from_str() {
        assert_eq!("perishable".parse::<ItemType>(), Ok(ItemType::Perishable));
        assert_eq!(
            "non-perishable".parse::<ItemType>(),
            Ok(ItemType::NonPerishable)
        );
    }

    #[test]
    fn test_item_type_rejects_unknown_and_wrong_case() {
        assert!("frozen".parse::<ItemType>().is_err());
        assert!("Perishable".parse::<ItemType>().is_err());
        assert!("non_perishable".parse::<ItemType>().is_err());
        assert!("".parse::<ItemType>().is_err());
    }

    #[test]
    fn test_item_type_serde_names() {
        assert_eq!(
            serde_json::to_string(&ItemType::NonPerishable).unwrap(),
            "\"non-perishable\""
        );
        let parsed: ItemType = serde_json::from_str("\"perishable\"").unwrap();
        assert_eq!(parsed, ItemType::Perishable);
        assert_eq!(ItemType::NonPerishable.to_string(), "non-perishable");
    }

    #[test]
    fn test_rule_terms_copies_numeric_fields() {
        let rule = PricingRule {
            id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            item_id: Uuid::new_v4(),
            zone: "central".to_string(),
            base_distance_in_km: dec!(5),
            km_price: dec!(1.5),
            fix_price: dec!(10),
        };

        let terms = rule.terms();
        assert_eq!(terms.base_distance_in_km, dec!(5));
        assert_eq!(terms.km_price, dec!(1.5));
        assert_eq!(terms.fix_price, dec!(10));
    }
}
