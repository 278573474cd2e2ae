//! In-memory pricing store.
//!
//! Used for local runs (`PRICING_STORE=memory`) and tests. A transaction holds
//! the table lock for its whole lifetime and writes to a private copy, which
//! replaces the shared tables only on commit.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use super::models::{Item, ItemType, NewPricingRule, Organization, PricingRule, RuleTerms};
use super::store::{PricingStore, PricingTransaction, StoreError, StoreResult};

#[derive(Debug, Clone, Default)]
struct Tables {
    organizations: Vec<Organization>,
    items: Vec<Item>,
    pricing_rules: Vec<PricingRule>,
}

impl Tables {
    fn organization_by_id(&self, id: Uuid) -> Option<Organization> {
        self.organizations.iter().find(|o| o.id == id).cloned()
    }

    fn item_by_type(&self, item_type: ItemType) -> Option<Item> {
        self.items.iter().find(|i| i.item_type == item_type).cloned()
    }

    fn pricing_rule(&self, organization_id: Uuid, item_id: Uuid, zone: &str) -> Option<PricingRule> {
        self.pricing_rules
            .iter()
            .find(|r| r.organization_id == organization_id && r.item_id == item_id && r.zone == zone)
            .cloned()
    }
}

#[derive(Clone, Default)]
pub struct InMemoryPricingStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryPricingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn organization_count(&self) -> usize {
        self.tables.lock().await.organizations.len()
    }

    pub async fn item_count(&self) -> usize {
        self.tables.lock().await.items.len()
    }

    pub async fn pricing_rule_count(&self) -> usize {
        self.tables.lock().await.pricing_rules.len()
    }
}

#[async_trait]
impl PricingStore for InMemoryPricingStore {
    async fn find_organization_by_id(&self, id: Uuid) -> StoreResult<Option<Organization>> {
        Ok(self.tables.lock().await.organization_by_id(id))
    }

    async fn find_item_by_type(&self, item_type: ItemType) -> StoreResult<Option<Item>> {
        Ok(self.tables.lock().await.item_by_type(item_type))
    }

    async fn find_pricing_rule(
        &self,
        organization_id: Uuid,
        item_id: Uuid,
        zone: &str,
    ) -> StoreResult<Option<PricingRule>> {
        Ok(self
            .tables
            .lock()
            .await
            .pricing_rule(organization_id, item_id, zone))
    }

    async fn begin(&self) -> StoreResult<Box<dyn PricingTransaction>> {
        let guard = Arc::clone(&self.tables).lock_owned().await;
        let working = (*guard).clone();
        Ok(Box::new(InMemoryTransaction { guard, working }))
    }
}

pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<Tables>,
    working: Tables,
}

#[async_trait]
impl PricingTransaction for InMemoryTransaction {
    async fn find_organization_by_name(&mut self, name: &str) -> StoreResult<Option<Organization>> {
        Ok(self
            .working
            .organizations
            .iter()
            .find(|o| o.name == name)
            .cloned())
    }

    async fn create_organization(&mut self, name: &str) -> StoreResult<Organization> {
        let organization = Organization {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        self.working.organizations.push(organization.clone());
        Ok(organization)
    }

    async fn find_item_by_type_and_description(
        &mut self,
        item_type: ItemType,
        description: &str,
    ) -> StoreResult<Option<Item>> {
        Ok(self
            .working
            .items
            .iter()
            .find(|i| i.item_type == item_type && i.description == description)
            .cloned())
    }

    async fn create_item(&mut self, item_type: ItemType, description: &str) -> StoreResult<Item> {
        let item = Item {
            id: Uuid::new_v4(),
            item_type,
            description: description.to_string(),
        };
        self.working.items.push(item.clone());
        Ok(item)
    }

    async fn find_pricing_rule(
        &mut self,
        organization_id: Uuid,
        item_id: Uuid,
        zone: &str,
    ) -> StoreResult<Option<PricingRule>> {
        Ok(self.working.pricing_rule(organization_id, item_id, zone))
    }

    async fn create_pricing_rule(&mut self, rule: NewPricingRule) -> StoreResult<PricingRule> {
        if self.working.organization_by_id(rule.organization_id).is_none() {
            return Err(StoreError::Backend(format!(
                "organization {} does not exist",
                rule.organization_id
            )));
        }
        if !self.working.items.iter().any(|i| i.id == rule.item_id) {
            return Err(StoreError::Backend(format!(
                "item {} does not exist",
                rule.item_id
            )));
        }
        if self
            .working
            .pricing_rule(rule.organization_id, rule.item_id, &rule.zone)
            .is_some()
        {
            return Err(StoreError::Backend(format!(
                "pricing rule for zone '{}' already exists",
                rule.zone
            )));
        }

        let created = PricingRule {
            id: Uuid::new_v4(),
            organization_id: rule.organization_id,
            item_id: rule.item_id,
            zone: rule.zone,
            base_distance_in_km: rule.terms.base_distance_in_km,
            km_price: rule.terms.km_price,
            fix_price: rule.terms.fix_price,
        };
        self.working.pricing_rules.push(created.clone());
        Ok(created)
    }

    async fn update_pricing_rule(
        &mut self,
        rule: PricingRule,
        terms: RuleTerms,
    ) -> StoreResult<PricingRule> {
        let stored = self
            .working
            .pricing_rules
            .iter_mut()
            .find(|r| r.id == rule.id)
            .ok_or_else(|| StoreError::Backend(format!("pricing rule {} does not exist", rule.id)))?;

        stored.base_distance_in_km = terms.base_distance_in_km;
        stored.km_price = terms.km_price;
        stored.fix_price = terms.fix_price;
        Ok(stored.clone())
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        let InMemoryTransaction { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> StoreResult<()> {
        Ok(())
    }
}
