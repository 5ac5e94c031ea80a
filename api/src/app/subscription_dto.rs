//! Wire-level request and response shapes for subscriptions
//!
//! Requests keep the raw client input (strings, optional fields) so that the
//! validator can report every bad field by name instead of failing on the
//! first deserialization error.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::entities::{Patch, Subscription};
use crate::domain::period::format_month_year;

/// Body of `POST /subscriptions`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateSubscriptionRequest {
    #[schema(example = "Yandex Plus")]
    pub service_name: Option<String>,
    #[schema(example = 400)]
    pub price: Option<Decimal>,
    #[schema(example = "60601fee-2bf1-4721-ae6f-7636e79a0cba")]
    pub user_id: Option<String>,
    /// MM-YYYY
    #[schema(example = "07-2025")]
    pub start_date: Option<String>,
    /// MM-YYYY
    #[schema(example = "12-2025")]
    pub end_date: Option<String>,
}

/// Body of `PUT /subscriptions/:id`; only supplied fields change
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateSubscriptionRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub service_name: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub price: Patch<Decimal>,
    /// MM-YYYY
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub start_date: Patch<String>,
    /// MM-YYYY; `null` makes the subscription open-ended
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub end_date: Patch<String>,
}

/// Query of `GET /subscriptions`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListSubscriptionsQuery {
    /// Only subscriptions of this user (UUID)
    pub user_id: Option<String>,
    /// Page size, at least 1 (default 10)
    pub limit: Option<String>,
    /// Rows to skip (default 0)
    pub offset: Option<String>,
}

/// Query of `GET /subscriptions/summary`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubscriptionSummaryQuery {
    /// Only subscriptions of this user (UUID)
    pub user_id: Option<String>,
    /// Only subscriptions with this exact service name
    pub service_name: Option<String>,
    /// Period start, MM-YYYY (required)
    pub start_date: Option<String>,
    /// Period end, MM-YYYY (required)
    pub end_date: Option<String>,
}

/// A subscription as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SubscriptionResponse {
    pub id: String,
    pub service_name: String,
    pub price: Decimal,
    pub user_id: String,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(subscription: Subscription) -> Self {
        SubscriptionResponse {
            id: subscription.id.to_string(),
            service_name: subscription.service_name,
            price: subscription.price,
            user_id: subscription.user_id.to_string(),
            start_date: format_month_year(subscription.start_date),
            end_date: subscription.end_date.map(format_month_year),
            created_at: subscription.created_at.to_rfc3339(),
            updated_at: subscription.updated_at.to_rfc3339(),
        }
    }
}

/// Result of `GET /subscriptions/summary`
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SubscriptionSummaryResponse {
    pub total_price: Decimal,
    pub count: u64,
    /// Echo of the requested period start, exactly as sent
    pub start_date: String,
    /// Echo of the requested period end, exactly as sent
    pub end_date: String,
}
