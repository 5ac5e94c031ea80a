//! Subscription service
//!
//! Validates requests, drives the repository, and shapes responses for
//! subscription CRUD, listing, and the period cost summary.

use std::sync::Arc;

use crate::app::subscription_dto::{
    CreateSubscriptionRequest, ListSubscriptionsQuery, SubscriptionResponse,
    SubscriptionSummaryQuery, SubscriptionSummaryResponse, UpdateSubscriptionRequest,
};
use crate::app::validator::SubscriptionValidator;
use crate::domain::entities::{Subscription, SubscriptionId};
use crate::domain::ports::SubscriptionRepository;
use crate::error::{AppError, DomainError};

const NOT_FOUND: &str = "Subscription not found";

/// Service for managing subscriptions
pub struct SubscriptionService<SR>
where
    SR: SubscriptionRepository,
{
    subscriptions: Arc<SR>,
    validator: Arc<SubscriptionValidator>,
}

impl<SR> SubscriptionService<SR>
where
    SR: SubscriptionRepository,
{
    pub fn new(subscriptions: Arc<SR>, validator: Arc<SubscriptionValidator>) -> Self {
        Self {
            subscriptions,
            validator,
        }
    }

    /// Create a subscription
    pub async fn create(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<SubscriptionResponse, AppError> {
        let new_subscription = self.validator.validate_create(&request)?;

        let subscription = self
            .subscriptions
            .create(&new_subscription)
            .await
            .map_err(AppError::store("Failed to create subscription"))?;

        tracing::info!(
            subscription_id = %subscription.id,
            user_id = %subscription.user_id,
            service_name = %subscription.service_name,
            "Subscription created"
        );

        Ok(subscription.into())
    }

    /// Get a subscription by ID
    ///
    /// Every lookup failure answers not found; store failures are logged first.
    pub async fn get_by_id(&self, id: &SubscriptionId) -> Result<SubscriptionResponse, AppError> {
        match self.subscriptions.find_by_id(id).await {
            Ok(Some(subscription)) => Ok(subscription.into()),
            Ok(None) => Err(AppError::NotFound(NOT_FOUND.to_string())),
            Err(e) => {
                tracing::error!(error = %e, subscription_id = %id, "Subscription lookup failed");
                Err(AppError::NotFound(NOT_FOUND.to_string()))
            }
        }
    }

    /// Apply a sparse update
    ///
    /// Last write wins: the merged record is written back without a version check.
    pub async fn update(
        &self,
        id: &SubscriptionId,
        request: UpdateSubscriptionRequest,
    ) -> Result<SubscriptionResponse, AppError> {
        let changes = self.validator.validate_update(&request)?;

        let existing = self.load(id, "Failed to update subscription").await?;
        let merged = existing.with_changes(changes);
        self.validator
            .validate_period_order(merged.start_date, merged.end_date)?;

        let updated = self
            .subscriptions
            .update(&merged)
            .await
            .map_err(|e| match e {
                DomainError::NotFound(_) => AppError::NotFound(NOT_FOUND.to_string()),
                e => AppError::store("Failed to update subscription")(e),
            })?;

        tracing::info!(subscription_id = %updated.id, "Subscription updated");

        Ok(updated.into())
    }

    /// Delete a subscription; deleting a missing ID still succeeds
    pub async fn delete(&self, id: &SubscriptionId) -> Result<(), AppError> {
        let removed = self
            .subscriptions
            .delete(id)
            .await
            .map_err(AppError::store("Failed to delete subscription"))?;

        if removed == 0 {
            tracing::debug!(subscription_id = %id, "No subscription to delete");
        } else {
            tracing::info!(subscription_id = %id, "Subscription deleted");
        }

        Ok(())
    }

    /// List one page of subscriptions
    pub async fn list(
        &self,
        query: ListSubscriptionsQuery,
    ) -> Result<Vec<SubscriptionResponse>, AppError> {
        let filter = self.validator.validate_list(&query)?;

        let subscriptions = self
            .subscriptions
            .list(&filter)
            .await
            .map_err(AppError::store("Failed to list subscriptions"))?;

        tracing::debug!(
            count = subscriptions.len(),
            limit = filter.limit,
            offset = filter.offset,
            "Listed subscriptions"
        );

        Ok(subscriptions.into_iter().map(Into::into).collect())
    }

    /// Total cost and count of subscriptions active during a period
    ///
    /// The period strings are echoed back exactly as the caller sent them.
    pub async fn get_summary(
        &self,
        query: SubscriptionSummaryQuery,
    ) -> Result<SubscriptionSummaryResponse, AppError> {
        let filter = self.validator.validate_summary(&query)?;

        let totals = self
            .subscriptions
            .summarize(&filter)
            .await
            .map_err(AppError::store("Failed to calculate summary"))?;

        Ok(SubscriptionSummaryResponse {
            total_price: totals.total_price,
            count: totals.count,
            start_date: query.start_date.unwrap_or_default(),
            end_date: query.end_date.unwrap_or_default(),
        })
    }

    async fn load(
        &self,
        id: &SubscriptionId,
        context: &'static str,
    ) -> Result<Subscription, AppError> {
        self.subscriptions
            .find_by_id(id)
            .await
            .map_err(AppError::store(context))?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
    }
}
