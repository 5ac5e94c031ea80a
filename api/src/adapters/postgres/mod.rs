//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod schema;
pub mod subscription_repo;


pub use subscription_repo::PostgresSubscriptionRepository;
