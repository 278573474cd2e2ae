//! Delivery fee pricing service.
//!
//! Prices deliveries from organization/zone/item pricing rules and exposes
//! the calculation and rule maintenance over a small JSON API.

pub mod config;
pub mod db;
pub mod error;
pub mod pricing;
pub mod routes;

use pricing::PricingService;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub pricing: PricingService,
}
