//! Test utilities
//!
//! In-memory port implementations and test fixtures for unit testing.
//!
//! The in-memory repository covers happy paths and HTTP-level tests through the
//! real router. Store failures are simulated with the mockall-generated
//! `MockSubscriptionRepository` instead.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
