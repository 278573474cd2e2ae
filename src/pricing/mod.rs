//! Delivery pricing module.
//!
//! Calculates delivery fees from per-organization, per-zone pricing rules and
//! maintains those rules.

pub mod calculators;
pub mod memory;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;
pub mod store;

// Re-export commonly used items
pub use calculators::{delivery_total, round_money};
pub use memory::InMemoryPricingStore;
pub use routes::{router, PricingApi};
pub use services::{PriceQuote, PricingError, PricingService};
pub use store::{PgPricingStore, PricingStore, PricingTransaction, StoreError};
