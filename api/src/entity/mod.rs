//! SeaORM entities
//!
//! Table models used by the PostgreSQL adapters.

pub mod subscriptions;
