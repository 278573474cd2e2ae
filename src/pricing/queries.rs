//! Database queries for the pricing store.
//!
//! Every query takes any Postgres executor, so the same function serves the
//! pool for reads and an open transaction for the create-or-update path.

use sqlx::PgExecutor;
use uuid::Uuid;

use super::models::{Item, ItemType, NewPricingRule, Organization, PricingRule, RuleTerms};

/// Get an organization by id
pub async fn find_organization_by_id<'e, E>(
    executor: E,
    id: Uuid,
) -> sqlx::Result<Option<Organization>>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Organization>(
        r#"
        SELECT id, name
        FROM organizations
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Get an organization by exact name
pub async fn find_organization_by_name<'e, E>(
    executor: E,
    name: &str,
) -> sqlx::Result<Option<Organization>>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Organization>(
        r#"
        SELECT id, name
        FROM organizations
        WHERE name = $1
        LIMIT 1
        "#,
    )
    .bind(name)
    .fetch_optional(executor)
    .await
}

/// Insert an organization
pub async fn insert_organization<'e, E>(executor: E, name: &str) -> sqlx::Result<Organization>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Organization>(
        r#"
        INSERT INTO organizations (id, name)
        VALUES ($1, $2)
        RETURNING id, name
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .fetch_one(executor)
    .await
}

/// Get any item of the given type.
///
/// No ordering is applied: when several descriptions share a type, whichever
/// row Postgres returns first wins.
pub async fn find_item_by_type<'e, E>(
    executor: E,
    item_type: ItemType,
) -> sqlx::Result<Option<Item>>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Item>(
        r#"
        SELECT id, type, description
        FROM items
        WHERE type = $1
        LIMIT 1
        "#,
    )
    .bind(item_type)
    .fetch_optional(executor)
    .await
}

/// Get an item by type and description
pub async fn find_item_by_type_and_description<'e, E>(
    executor: E,
    item_type: ItemType,
    description: &str,
) -> sqlx::Result<Option<Item>>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Item>(
        r#"
        SELECT id, type, description
        FROM items
        WHERE type = $1
          AND description = $2
        LIMIT 1
        "#,
    )
    .bind(item_type)
    .bind(description)
    .fetch_optional(executor)
    .await
}

/// Insert an item
pub async fn insert_item<'e, E>(
    executor: E,
    item_type: ItemType,
    description: &str,
) -> sqlx::Result<Item>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Item>(
        r#"
        INSERT INTO items (id, type, description)
        VALUES ($1, $2, $3)
        RETURNING id, type, description
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(item_type)
    .bind(description)
    .fetch_one(executor)
    .await
}

/// Find the pricing rule for an (organization, item, zone) triple
pub async fn find_pricing_rule<'e, E>(
    executor: E,
    organization_id: Uuid,
    item_id: Uuid,
    zone: &str,
) -> sqlx::Result<Option<PricingRule>>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, PricingRule>(
        r#"
        SELECT
            id, organization_id, item_id, zone,
            base_distance_in_km, km_price, fix_price
        FROM pricing_rules
        WHERE organization_id = $1
          AND item_id = $2
          AND zone = $3
        "#,
    )
    .bind(organization_id)
    .bind(item_id)
    .bind(zone)
    .fetch_optional(executor)
    .await
}

/// Insert a pricing rule
pub async fn insert_pricing_rule<'e, E>(
    executor: E,
    rule: &NewPricingRule,
) -> sqlx::Result<PricingRule>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, PricingRule>(
        r#"
        INSERT INTO pricing_rules (
            id, organization_id, item_id, zone,
            base_distance_in_km, km_price, fix_price
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING
            id, organization_id, item_id, zone,
            base_distance_in_km, km_price, fix_price
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(rule.organization_id)
    .bind(rule.item_id)
    .bind(&rule.zone)
    .bind(rule.terms.base_distance_in_km)
    .bind(rule.terms.km_price)
    .bind(rule.terms.fix_price)
    .fetch_one(executor)
    .await
}

/// Overwrite the numeric terms of an existing pricing rule
pub async fn update_pricing_rule_terms<'e, E>(
    executor: E,
    rule_id: Uuid,
    terms: &RuleTerms,
) -> sqlx::Result<PricingRule>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, PricingRule>(
        r#"
        UPDATE pricing_rules
        SET base_distance_in_km = $2,
            km_price = $3,
            fix_price = $4
        WHERE id = $1
        RETURNING
            id, organization_id, item_id, zone,
            base_distance_in_km, km_price, fix_price
        "#,
    )
    .bind(rule_id)
    .bind(terms.base_distance_in_km)
    .bind(terms.km_price)
    .bind(terms.fix_price)
    .fetch_one(executor)
    .await
}
