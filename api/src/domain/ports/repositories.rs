//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{
    ListFilter, NewSubscription, Subscription, SubscriptionId, SubscriptionTotals, SummaryFilter,
};
use crate::error::DomainError;

/// Repository for Subscription entities
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Insert a subscription; the store assigns id and timestamps
    async fn create(&self, subscription: &NewSubscription) -> Result<Subscription, DomainError>;

    /// Find a subscription by ID
    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError>;

    /// Persist every mutable attribute of `subscription` and bump `updated_at`
    ///
    /// Returns `DomainError::NotFound` if the row no longer exists.
    async fn update(&self, subscription: &Subscription) -> Result<Subscription, DomainError>;

    /// Delete by ID, returning the number of rows removed
    async fn delete(&self, id: &SubscriptionId) -> Result<u64, DomainError>;

    /// One page of subscriptions, optionally for a single user
    async fn list(&self, filter: &ListFilter) -> Result<Vec<Subscription>, DomainError>;

    /// Count and total price of the subscriptions active during the filter's period
    async fn summarize(&self, filter: &SummaryFilter) -> Result<SubscriptionTotals, DomainError>;
}
