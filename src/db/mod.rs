//! Database connection and schema setup

pub mod pool;
pub mod schema;

pub use pool::connect;
pub use schema::ensure_schema;
