//! Subscription domain entity
//!
//! Represents a user's recurring payment for a named service, active from a
//! start month until an optional end month.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::patch::Patch;

/// Unique identifier for a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub Uuid);

impl SubscriptionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SubscriptionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the owning user (users are not modelled here)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored subscription
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub service_name: String,
    /// Monthly price, always > 0
    pub price: Decimal,
    pub user_id: UserId,
    /// First day of the start month
    pub start_date: NaiveDate,
    /// First day of the end month; `None` while the subscription is ongoing
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    /// Whether the subscription overlaps `[period_start, period_end]` at all
    pub fn is_active_during(&self, period_start: NaiveDate, period_end: NaiveDate) -> bool {
        self.start_date <= period_end && self.end_date.map_or(true, |end| end >= period_start)
    }

    /// Merge a sparse update; fields left out keep their current value
    pub fn with_changes(mut self, changes: SubscriptionChanges) -> Self {
        if let Some(service_name) = changes.service_name {
            self.service_name = service_name;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(start_date) = changes.start_date {
            self.start_date = start_date;
        }
        self.end_date = changes.end_date.apply_to(self.end_date);
        self
    }
}

/// Data needed to create a new subscription
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscription {
    pub service_name: String,
    pub price: Decimal,
    pub user_id: UserId,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Validated sparse update
///
/// Required attributes can only be replaced; only `end_date` can be cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriptionChanges {
    pub service_name: Option<String>,
    pub price: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Patch<NaiveDate>,
}

/// Filter and page for listing subscriptions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter {
    pub user_id: Option<UserId>,
    pub limit: u64,
    pub offset: u64,
}

/// Selection for the cost summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryFilter {
    pub user_id: Option<UserId>,
    pub service_name: Option<String>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

impl SummaryFilter {
    pub fn matches(&self, subscription: &Subscription) -> bool {
        subscription.is_active_during(self.period_start, self.period_end)
            && self.user_id.map_or(true, |id| subscription.user_id == id)
            && self
                .service_name
                .as_ref()
                .map_or(true, |name| &subscription.service_name == name)
    }
}

/// Aggregate over the subscriptions a `SummaryFilter` selects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubscriptionTotals {
    pub total_price: Decimal,
    pub count: u64,
}
