//! Pricing service with store access.
//!
//! Validates raw requests, resolves organizations, items and rules through the
//! [`PricingStore`], and runs the create-or-update path inside one store
//! transaction.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::calculators::delivery_total;
use super::models::{ItemType, NewPricingRule, PricingRule, RuleTerms};
use super::requests::{
    numeric_value, text_value, value_is_missing, CalculatePriceRequest, CreatePricingRuleRequest,
};
use super::store::{PricingStore, PricingTransaction, StoreError};

/// Pricing operation failure. The display text is the client-facing message.
#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("Missing required input data")]
    MissingInput,

    #[error("Invalid distance value")]
    InvalidDistance,

    #[error("Invalid numeric values")]
    InvalidNumericValues,

    #[error("Invalid item type")]
    InvalidItemType,

    #[error("Organization not found")]
    OrganizationNotFound,

    #[error("Item not found")]
    ItemNotFound,

    #[error("Pricing data not found for the given parameters")]
    PricingNotFound,

    #[error("Delivery price out of range")]
    PriceOutOfRange,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a delivery price calculation
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    /// Always carries two decimal places.
    pub total_price: Decimal,
    pub pricing_rule_id: Uuid,
}

/// Validated input for [`PricingService::calculate_price`]
struct PriceLookup {
    zone: String,
    organization_id: String,
    total_distance_km: Decimal,
    item_type: Value,
}

/// Validated input for [`PricingService::create_or_update_pricing_rule`]
struct RuleUpsert {
    organization_name: String,
    zone: String,
    item_type: ItemType,
    description: String,
    terms: RuleTerms,
}

#[derive(Clone)]
pub struct PricingService {
    store: Arc<dyn PricingStore>,
}

impl PricingService {
    pub fn new(store: Arc<dyn PricingStore>) -> Self {
        Self { store }
    }

    /// Calculate the delivery price for an organization, zone and item type.
    ///
    /// Checks run in a fixed order and the first failing one decides the
    /// error: missing input, invalid distance or organization id, invalid
    /// item type, unknown organization, unknown item, missing rule. A total
    /// too large to represent fails with [`PricingError::PriceOutOfRange`].
    pub async fn calculate_price(
        &self,
        request: CalculatePriceRequest,
    ) -> Result<PriceQuote, PricingError> {
        let lookup = validate_price_lookup(request)?;

        let item_type = parse_item_type(&lookup.item_type)?;

        // A string that is not a valid id cannot name an existing organization.
        let organization = match Uuid::parse_str(&lookup.organization_id) {
            Ok(id) => self.store.find_organization_by_id(id).await?,
            Err(_) => None,
        }
        .ok_or(PricingError::OrganizationNotFound)?;

        let item = self
            .store
            .find_item_by_type(item_type)
            .await?
            .ok_or(PricingError::ItemNotFound)?;

        let rule = self
            .store
            .find_pricing_rule(organization.id, item.id, &lookup.zone)
            .await?
            .ok_or(PricingError::PricingNotFound)?;
        debug!(?rule, "Resolved pricing rule");

        let total_price = delivery_total(&rule.terms(), lookup.total_distance_km, item_type)
            .ok_or(PricingError::PriceOutOfRange)?;

        Ok(PriceQuote {
            total_price,
            pricing_rule_id: rule.id,
        })
    }

    /// Create the pricing rule for an (organization, item, zone) triple, or
    /// overwrite its numeric terms if it already exists.
    ///
    /// The organization and item are found or created by name and by
    /// (type, description). Every write happens in a single transaction that
    /// is rolled back on any failure.
    pub async fn create_or_update_pricing_rule(
        &self,
        request: CreatePricingRuleRequest,
    ) -> Result<PricingRule, PricingError> {
        let upsert = validate_rule_upsert(request)?;

        let mut tx = self.store.begin().await?;
        match upsert_in_transaction(&mut *tx, &upsert).await {
            Ok(rule) => {
                tx.commit().await?;
                Ok(rule)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Rollback failed after pricing rule error: {}", rollback_err);
                }
                Err(e.into())
            }
        }
    }
}

async fn upsert_in_transaction(
    tx: &mut dyn PricingTransaction,
    upsert: &RuleUpsert,
) -> Result<PricingRule, StoreError> {
    let organization = match tx.find_organization_by_name(&upsert.organization_name).await? {
        Some(organization) => organization,
        None => {
            let organization = tx.create_organization(&upsert.organization_name).await?;
            info!(id = %organization.id, name = %organization.name, "Created organization");
            organization
        }
    };

    let item = match tx
        .find_item_by_type_and_description(upsert.item_type, &upsert.description)
        .await?
    {
        Some(item) => item,
        None => {
            let item = tx.create_item(upsert.item_type, &upsert.description).await?;
            info!(id = %item.id, item_type = %item.item_type, "Created item");
            item
        }
    };

    let existing = tx
        .find_pricing_rule(organization.id, item.id, &upsert.zone)
        .await?;

    let rule = match existing {
        Some(rule) => {
            let rule = tx.update_pricing_rule(rule, upsert.terms).await?;
            info!(id = %rule.id, zone = %rule.zone, "Updated pricing rule");
            rule
        }
        None => {
            let rule = tx
                .create_pricing_rule(NewPricingRule {
                    organization_id: organization.id,
                    item_id: item.id,
                    zone: upsert.zone.clone(),
                    terms: upsert.terms,
                })
                .await?;
            info!(id = %rule.id, zone = %rule.zone, "Created pricing rule");
            rule
        }
    };

    Ok(rule)
}

fn validate_price_lookup(request: CalculatePriceRequest) -> Result<PriceLookup, PricingError> {
    let CalculatePriceRequest {
        zone,
        organization_id,
        total_distance,
        item_type,
    } = request;

    if value_is_missing(zone.as_ref())
        || value_is_missing(organization_id.as_ref())
        || value_is_missing(total_distance.as_ref())
        || value_is_missing(item_type.as_ref())
    {
        return Err(PricingError::MissingInput);
    }

    let total_distance_km = total_distance
        .as_ref()
        .and_then(numeric_value)
        .ok_or(PricingError::InvalidDistance)?;

    let organization_id = match organization_id {
        Some(Value::String(id)) => id,
        _ => return Err(PricingError::InvalidDistance),
    };

    Ok(PriceLookup {
        zone: text_value(zone),
        organization_id,
        total_distance_km,
        item_type: item_type.unwrap_or_default(),
    })
}

fn validate_rule_upsert(request: CreatePricingRuleRequest) -> Result<RuleUpsert, PricingError> {
    let CreatePricingRuleRequest {
        organization_name,
        zone,
        item_type,
        description,
        base_distance_in_km,
        km_price,
        fix_price,
    } = request;

    if value_is_missing(zone.as_ref())
        || value_is_missing(organization_name.as_ref())
        || value_is_missing(item_type.as_ref())
        || value_is_missing(description.as_ref())
        || value_is_missing(base_distance_in_km.as_ref())
        || value_is_missing(km_price.as_ref())
        || value_is_missing(fix_price.as_ref())
    {
        return Err(PricingError::MissingInput);
    }

    let terms = RuleTerms {
        base_distance_in_km: rule_number(base_distance_in_km.as_ref())?,
        km_price: rule_number(km_price.as_ref())?,
        fix_price: rule_number(fix_price.as_ref())?,
    };

    let item_type = parse_item_type(&item_type.unwrap_or_default())?;

    Ok(RuleUpsert {
        organization_name: text_value(organization_name),
        zone: text_value(zone),
        item_type,
        description: text_value(description),
        terms,
    })
}

/// Only the exact strings `perishable` and `non-perishable` name an item type.
fn parse_item_type(value: &Value) -> Result<ItemType, PricingError> {
    value
        .as_str()
        .and_then(|text| text.parse().ok())
        .ok_or(PricingError::InvalidItemType)
}

/// Rule terms must be numeric and non-negative. Negative terms are refused
/// here rather than stored.
fn rule_number(value: Option<&Value>) -> Result<Decimal, PricingError> {
    value
        .and_then(numeric_value)
        .filter(|n| !n.is_sign_negative())
        .ok_or(PricingError::InvalidNumericValues)
}
