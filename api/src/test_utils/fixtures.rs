//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::app::CreateSubscriptionRequest;
use crate::domain::entities::{Subscription, SubscriptionId, UserId};
use crate::domain::period::parse_month_year;

/// Owner of every fixture subscription
pub const TEST_USER: &str = "6f9619ff-8b86-4d01-b42d-00cf4fc964ff";

pub fn test_user_id() -> UserId {
    UserId(Uuid::parse_str(TEST_USER).unwrap())
}

/// Create a test subscription owned by `TEST_USER`
///
/// `start` and `end` are `MM-YYYY` periods.
pub fn test_subscription(name: &str, price: i64, start: &str, end: Option<&str>) -> Subscription {
    let now = Utc::now();
    Subscription {
        id: SubscriptionId::new(),
        service_name: name.to_string(),
        price: Decimal::from(price),
        user_id: test_user_id(),
        start_date: parse_month_year(start).unwrap(),
        end_date: end.map(|e| parse_month_year(e).unwrap()),
        created_at: now,
        updated_at: now,
    }
}

/// A valid create request: Netflix, 9.99, 01-2024 to 12-2024
pub fn create_request() -> CreateSubscriptionRequest {
    CreateSubscriptionRequest {
        service_name: Some("Netflix".to_string()),
        price: Some(Decimal::new(999, 2)),
        user_id: Some(TEST_USER.to_string()),
        start_date: Some("01-2024".to_string()),
        end_date: Some("12-2024".to_string()),
    }
}
