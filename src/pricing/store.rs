//! Entity store contract for the pricing service, and its Postgres backend.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::models::{Item, ItemType, NewPricingRule, Organization, PricingRule, RuleTerms};
use super::queries;

/// Store failure. Surfaced to callers through its message.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Backend(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Read access used by price calculation, plus the entry point for writes.
#[async_trait]
pub trait PricingStore: Send + Sync {
    async fn find_organization_by_id(&self, id: Uuid) -> StoreResult<Option<Organization>>;

    /// Any item of the given type; which one is unspecified when several exist.
    async fn find_item_by_type(&self, item_type: ItemType) -> StoreResult<Option<Item>>;

    async fn find_pricing_rule(
        &self,
        organization_id: Uuid,
        item_id: Uuid,
        zone: &str,
    ) -> StoreResult<Option<PricingRule>>;

    /// Open an atomic unit of work. Dropping it without `commit` discards
    /// every write made through it.
    async fn begin(&self) -> StoreResult<Box<dyn PricingTransaction>>;
}

/// Operations of the create-or-update path, all inside one transaction.
#[async_trait]
pub trait PricingTransaction: Send {
    async fn find_organization_by_name(&mut self, name: &str) -> StoreResult<Option<Organization>>;

    async fn create_organization(&mut self, name: &str) -> StoreResult<Organization>;

    async fn find_item_by_type_and_description(
        &mut self,
        item_type: ItemType,
        description: &str,
    ) -> StoreResult<Option<Item>>;

    async fn create_item(&mut self, item_type: ItemType, description: &str) -> StoreResult<Item>;

    async fn find_pricing_rule(
        &mut self,
        organization_id: Uuid,
        item_id: Uuid,
        zone: &str,
    ) -> StoreResult<Option<PricingRule>>;

    async fn create_pricing_rule(&mut self, rule: NewPricingRule) -> StoreResult<PricingRule>;

    async fn update_pricing_rule(
        &mut self,
        rule: PricingRule,
        terms: RuleTerms,
    ) -> StoreResult<PricingRule>;

    async fn commit(self: Box<Self>) -> StoreResult<()>;

    async fn rollback(self: Box<Self>) -> StoreResult<()>;
}

/// Postgres-backed store over a shared connection pool.
#[derive(Clone)]
pub struct PgPricingStore {
    pool: PgPool,
}

impl PgPricingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PricingStore for PgPricingStore {
    async fn find_organization_by_id(&self, id: Uuid) -> StoreResult<Option<Organization>> {
        Ok(queries::find_organization_by_id(&self.pool, id).await?)
    }

    async fn find_item_by_type(&self, item_type: ItemType) -> StoreResult<Option<Item>> {
        Ok(queries::find_item_by_type(&self.pool, item_type).await?)
    }

    async fn find_pricing_rule(
        &self,
        organization_id: Uuid,
        item_id: Uuid,
        zone: &str,
    ) -> StoreResult<Option<PricingRule>> {
        Ok(queries::find_pricing_rule(&self.pool, organization_id, item_id, zone).await?)
    }

    async fn begin(&self) -> StoreResult<Box<dyn PricingTransaction>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgPricingTransaction { tx }))
    }
}

/// An open Postgres transaction. sqlx rolls it back on drop if uncommitted.
pub struct PgPricingTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl PricingTransaction for PgPricingTransaction {
    async fn find_organization_by_name(&mut self, name: &str) -> StoreResult<Option<Organization>> {
        Ok(queries::find_organization_by_name(&mut *self.tx, name).await?)
    }

    async fn create_organization(&mut self, name: &str) -> StoreResult<Organization> {
        Ok(queries::insert_organization(&mut *self.tx, name).await?)
    }

    async fn find_item_by_type_and_description(
        &mut self,
        item_type: ItemType,
        description: &str,
    ) -> StoreResult<Option<Item>> {
        Ok(queries::find_item_by_type_and_description(&mut *self.tx, item_type, description).await?)
    }

    async fn create_item(&mut self, item_type: ItemType, description: &str) -> StoreResult<Item> {
        Ok(queries::insert_item(&mut *self.tx, item_type, description).await?)
    }

    async fn find_pricing_rule(
        &mut self,
        organization_id: Uuid,
        item_id: Uuid,
        zone: &str,
    ) -> StoreResult<Option<PricingRule>> {
        Ok(queries::find_pricing_rule(&mut *self.tx, organization_id, item_id, zone).await?)
    }

    async fn create_pricing_rule(&mut self, rule: NewPricingRule) -> StoreResult<PricingRule> {
        Ok(queries::insert_pricing_rule(&mut *self.tx, &rule).await?)
    }

    async fn update_pricing_rule(
        &mut self,
        rule: PricingRule,
        terms: RuleTerms,
    ) -> StoreResult<PricingRule> {
        Ok(queries::update_pricing_rule_terms(&mut *self.tx, rule.id, &terms).await?)
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> StoreResult<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
