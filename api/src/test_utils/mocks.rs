//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    ListFilter, NewSubscription, Subscription, SubscriptionId, SubscriptionTotals, SummaryFilter,
};
use crate::domain::ports::SubscriptionRepository;
use crate::error::DomainError;

// ============================================================================
// In-Memory Subscription Repository
// ============================================================================

/// Keeps insertion order, which is also its list order
///
/// Clones share the same storage.
#[derive(Clone, Default)]
pub struct InMemorySubscriptionRepository {
    subscriptions: Arc<RwLock<Vec<Subscription>>>,
}

impl InMemorySubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a subscription for testing
    pub fn with_subscription(self, subscription: Subscription) -> Self {
        self.subscriptions.write().unwrap().push(subscription);
        self
    }

    pub fn len(&self) -> usize {
        self.subscriptions.read().unwrap().len()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn create(&self, new: &NewSubscription) -> Result<Subscription, DomainError> {
        let now = Utc::now();
        let subscription = Subscription {
            id: SubscriptionId::new(),
            service_name: new.service_name.clone(),
            price: new.price,
            user_id: new.user_id,
            start_date: new.start_date,
            end_date: new.end_date,
            created_at: now,
            updated_at: now,
        };

        self.subscriptions
            .write()
            .unwrap()
            .push(subscription.clone());

        Ok(subscription)
    }

    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError> {
        let subscriptions = self.subscriptions.read().unwrap();
        Ok(subscriptions.iter().find(|s| s.id == *id).cloned())
    }

    async fn update(&self, subscription: &Subscription) -> Result<Subscription, DomainError> {
        let mut subscriptions = self.subscriptions.write().unwrap();
        let stored = subscriptions
            .iter_mut()
            .find(|s| s.id == subscription.id)
            .ok_or_else(|| DomainError::NotFound(format!("Subscription {}", subscription.id)))?;

        stored.service_name = subscription.service_name.clone();
        stored.price = subscription.price;
        stored.start_date = subscription.start_date;
        stored.end_date = subscription.end_date;
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn delete(&self, id: &SubscriptionId) -> Result<u64, DomainError> {
        let mut subscriptions = self.subscriptions.write().unwrap();
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id != *id);
        Ok((before - subscriptions.len()) as u64)
    }

    async fn list(&self, filter: &ListFilter) -> Result<Vec<Subscription>, DomainError> {
        let subscriptions = self.subscriptions.read().unwrap();
        Ok(subscriptions
            .iter()
            .filter(|s| filter.user_id.map_or(true, |id| s.user_id == id))
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .cloned()
            .collect())
    }

    async fn summarize(&self, filter: &SummaryFilter) -> Result<SubscriptionTotals, DomainError> {
        let subscriptions = self.subscriptions.read().unwrap();
        let matching: Vec<&Subscription> =
            subscriptions.iter().filter(|s| filter.matches(s)).collect();

        Ok(SubscriptionTotals {
            total_price: matching.iter().map(|s| s.price).sum::<Decimal>(),
            count: matching.len() as u64,
        })
    }
}
