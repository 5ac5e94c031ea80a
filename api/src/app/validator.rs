//! Request validation
//!
//! Turns raw wire requests into validated domain values. One validator is
//! built at startup and shared by reference with the service.

use std::ops::RangeInclusive;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::app::subscription_dto::{
    CreateSubscriptionRequest, ListSubscriptionsQuery, SubscriptionSummaryQuery,
    UpdateSubscriptionRequest,
};
use crate::domain::entities::{
    ListFilter, NewSubscription, Patch, SubscriptionChanges, SummaryFilter, UserId,
};
use crate::domain::period::parse_month_year;
use crate::error::{DomainError, ValidationErrors};

pub const DEFAULT_PAGE_LIMIT: u64 = 10;

const MAX_PRICE: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);
const PRICE_SCALE: u32 = 2;

/// Validation rules for subscription requests
#[derive(Debug, Clone)]
pub struct SubscriptionValidator {
    service_name_len: RangeInclusive<usize>,
    default_limit: u64,
}

impl Default for SubscriptionValidator {
    fn default() -> Self {
        Self {
            service_name_len: 2..=100,
            default_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl SubscriptionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything is required at creation, `end_date` included
    pub fn validate_create(
        &self,
        request: &CreateSubscriptionRequest,
    ) -> Result<NewSubscription, DomainError> {
        let mut errors = ValidationErrors::new();

        let service_name = match &request.service_name {
            Some(name) => self.service_name("service_name", name, &mut errors),
            None => required("service_name", &mut errors),
        };
        let price = match request.price {
            Some(price) => price_value(price, &mut errors),
            None => required("price", &mut errors),
        };
        let user_id = match &request.user_id {
            Some(raw) => user_id("user_id", raw, &mut errors),
            None => required("user_id", &mut errors),
        };
        let start_date = match &request.start_date {
            Some(raw) => period("start_date", raw, &mut errors),
            None => required("start_date", &mut errors),
        };
        let end_date = match &request.end_date {
            Some(raw) => period("end_date", raw, &mut errors),
            None => required("end_date", &mut errors),
        };

        if let (Some(start), Some(end)) = (start_date, end_date) {
            check_order(start, Some(end), &mut errors);
        }

        match (service_name, price, user_id, start_date) {
            (Some(service_name), Some(price), Some(user_id), Some(start_date))
                if errors.is_empty() =>
            {
                Ok(NewSubscription {
                    service_name,
                    price,
                    user_id,
                    start_date,
                    end_date,
                })
            }
            _ => Err(DomainError::Validation(errors)),
        }
    }

    /// Each supplied field is checked on its own; `null` clears only `end_date`
    pub fn validate_update(
        &self,
        request: &UpdateSubscriptionRequest,
    ) -> Result<SubscriptionChanges, DomainError> {
        let mut errors = ValidationErrors::new();

        let service_name = match &request.service_name {
            Patch::Absent => None,
            Patch::Null => not_nullable("service_name", &mut errors),
            Patch::Value(name) => self.service_name("service_name", name, &mut errors),
        };
        let price = match request.price {
            Patch::Absent => None,
            Patch::Null => not_nullable("price", &mut errors),
            Patch::Value(price) => price_value(price, &mut errors),
        };
        let start_date = match &request.start_date {
            Patch::Absent => None,
            Patch::Null => not_nullable("start_date", &mut errors),
            Patch::Value(raw) => period("start_date", raw, &mut errors),
        };
        let end_date = match &request.end_date {
            Patch::Absent => Patch::Absent,
            Patch::Null => Patch::Null,
            Patch::Value(raw) => period("end_date", raw, &mut errors)
                .map(Patch::Value)
                .unwrap_or(Patch::Absent),
        };

        errors.into_result()?;
        Ok(SubscriptionChanges {
            service_name,
            price,
            start_date,
            end_date,
        })
    }

    /// Re-check the date order once an update has been merged into the stored record
    pub fn validate_period_order(
        &self,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Result<(), DomainError> {
        let mut errors = ValidationErrors::new();
        check_order(start_date, end_date, &mut errors);
        errors.into_result()
    }

    /// Empty query values count as absent
    pub fn validate_list(&self, query: &ListSubscriptionsQuery) -> Result<ListFilter, DomainError> {
        let mut errors = ValidationErrors::new();

        let user_id = non_empty(&query.user_id).and_then(|raw| user_id("user_id", raw, &mut errors));

        let limit = match non_empty(&query.limit) {
            Some(raw) => match raw.parse::<i64>() {
                Ok(limit) if limit >= 1 => limit as u64,
                _ => {
                    errors.push("limit", "must be an integer greater than 0");
                    self.default_limit
                }
            },
            None => self.default_limit,
        };

        let offset = match non_empty(&query.offset) {
            Some(raw) => match raw.parse::<i64>() {
                Ok(offset) if offset >= 0 => offset as u64,
                _ => {
                    errors.push("offset", "must be an integer greater than or equal to 0");
                    0
                }
            },
            None => 0,
        };

        errors.into_result()?;
        Ok(ListFilter {
            user_id,
            limit,
            offset,
        })
    }

    pub fn validate_summary(
        &self,
        query: &SubscriptionSummaryQuery,
    ) -> Result<SummaryFilter, DomainError> {
        let mut errors = ValidationErrors::new();

        let user_id = non_empty(&query.user_id).and_then(|raw| user_id("user_id", raw, &mut errors));
        let service_name = non_empty(&query.service_name)
            .and_then(|name| self.service_name("service_name", name, &mut errors));
        let period_start = match non_empty(&query.start_date) {
            Some(raw) => period("start_date", raw, &mut errors),
            None => required("start_date", &mut errors),
        };
        let period_end = match non_empty(&query.end_date) {
            Some(raw) => period("end_date", raw, &mut errors),
            None => required("end_date", &mut errors),
        };

        // A reversed period is accepted; the overlap rule applies as written
        match (period_start, period_end) {
            (Some(period_start), Some(period_end)) => {
                errors.into_result()?;
                Ok(SummaryFilter {
                    user_id,
                    service_name,
                    period_start,
                    period_end,
                })
            }
            _ => Err(DomainError::Validation(errors)),
        }
    }

    fn service_name(
        &self,
        field: &'static str,
        name: &str,
        errors: &mut ValidationErrors,
    ) -> Option<String> {
        let len = name.chars().count();
        if self.service_name_len.contains(&len) {
            Some(name.to_string())
        } else {
            errors.push(
                field,
                format!(
                    "must be between {} and {} characters",
                    self.service_name_len.start(),
                    self.service_name_len.end()
                ),
            );
            None
        }
    }
}

fn required<T>(field: &'static str, errors: &mut ValidationErrors) -> Option<T> {
    errors.push(field, "is required");
    None
}

fn not_nullable<T>(field: &'static str, errors: &mut ValidationErrors) -> Option<T> {
    errors.push(field, "cannot be null");
    None
}

/// Fits the `NUMERIC(10, 2)` price column without rounding
fn price_value(price: Decimal, errors: &mut ValidationErrors) -> Option<Decimal> {
    if price <= Decimal::ZERO {
        errors.push("price", "must be greater than 0");
        None
    } else if price >= MAX_PRICE {
        errors.push("price", format!("must be less than {}", MAX_PRICE));
        None
    } else if price.normalize().scale() > PRICE_SCALE {
        errors.push(
            "price",
            format!("must have at most {} decimal places", PRICE_SCALE),
        );
        None
    } else {
        Some(price)
    }
}

fn user_id(field: &'static str, raw: &str, errors: &mut ValidationErrors) -> Option<UserId> {
    match Uuid::parse_str(raw) {
        Ok(id) => Some(UserId(id)),
        Err(_) => {
            errors.push(field, "must be a valid UUID");
            None
        }
    }
}

fn period(field: &'static str, raw: &str, errors: &mut ValidationErrors) -> Option<NaiveDate> {
    match parse_month_year(raw) {
        Ok(date) => Some(date),
        Err(e) => {
            errors.push(field, e.to_string());
            None
        }
    }
}

fn check_order(start: NaiveDate, end: Option<NaiveDate>, errors: &mut ValidationErrors) {
    if end.is_some_and(|end| end < start) {
        errors.push("end_date", "must not be before start_date");
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER: &str = "6f9619ff-8b86-4d01-b42d-00cf4fc964ff";

    fn validation_errors(result: Result<impl std::fmt::Debug, DomainError>) -> ValidationErrors {
        match result {
            Err(DomainError::Validation(errors)) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    fn create_request() -> CreateSubscriptionRequest {
        CreateSubscriptionRequest {
            service_name: Some("Netflix".to_string()),
            price: Some(Decimal::new(999, 2)),
            user_id: Some(USER.to_string()),
            start_date: Some("01-2024".to_string()),
            end_date: Some("12-2024".to_string()),
        }
    }

    #[test]
    fn create_translates_valid_request() {
        let new = SubscriptionValidator::new()
            .validate_create(&create_request())
            .unwrap();

        assert_eq!(new.service_name, "Netflix");
        assert_eq!(new.price, Decimal::new(999, 2));
        assert_eq!(new.user_id.to_string(), USER);
        assert_eq!(new.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(new.end_date, NaiveDate::from_ymd_opt(2024, 12, 1));
    }

    #[test]
    fn create_reports_every_missing_field() {
        let errors = validation_errors(
            SubscriptionValidator::new().validate_create(&CreateSubscriptionRequest::default()),
        );

        for field in ["service_name", "price", "user_id", "start_date", "end_date"] {
            assert!(errors.has_field(field), "missing {}", field);
        }
    }

    #[test]
    fn create_rejects_zero_and_negative_price() {
        let validator = SubscriptionValidator::new();
        for price in [Decimal::ZERO, Decimal::from(-5)] {
            let request = CreateSubscriptionRequest {
                price: Some(price),
                ..create_request()
            };
            let errors = validation_errors(validator.validate_create(&request));
            assert!(errors.has_field("price"));
        }
    }

    #[test]
    fn create_rejects_prices_the_column_cannot_hold() {
        let validator = SubscriptionValidator::new();
        for price in [Decimal::from(100_000_000), Decimal::new(9999, 3)] {
            let request = CreateSubscriptionRequest {
                price: Some(price),
                ..create_request()
            };
            let errors = validation_errors(validator.validate_create(&request));
            assert!(errors.has_field("price"), "{} should be rejected", price);
        }

        for price in [Decimal::new(9_999_999_999, 2), Decimal::new(9900, 3)] {
            let request = CreateSubscriptionRequest {
                price: Some(price),
                ..create_request()
            };
            assert!(validator.validate_create(&request).is_ok(), "{} should pass", price);
        }
    }

    #[test]
    fn update_applies_price_limits() {
        let request = UpdateSubscriptionRequest {
            price: Patch::Value(Decimal::new(1001, 3)),
            ..Default::default()
        };
        let errors = validation_errors(SubscriptionValidator::new().validate_update(&request));
        assert_eq!(errors.messages(), vec!["price: must have at most 2 decimal places"]);
    }

    #[test]
    fn create_checks_name_length_in_characters() {
        let validator = SubscriptionValidator::new();

        let short = CreateSubscriptionRequest {
            service_name: Some("N".to_string()),
            ..create_request()
        };
        assert!(validation_errors(validator.validate_create(&short)).has_field("service_name"));

        let long = CreateSubscriptionRequest {
            service_name: Some("a".repeat(101)),
            ..create_request()
        };
        assert!(validation_errors(validator.validate_create(&long)).has_field("service_name"));

        // 100 multi-byte characters is still within bounds
        let cyrillic = CreateSubscriptionRequest {
            service_name: Some("я".repeat(100)),
            ..create_request()
        };
        assert!(validator.validate_create(&cyrillic).is_ok());
    }

    #[test]
    fn create_rejects_bad_user_id_and_dates() {
        let request = CreateSubscriptionRequest {
            user_id: Some("not-a-uuid".to_string()),
            start_date: Some("13-2024".to_string()),
            end_date: Some("2024-12".to_string()),
            ..create_request()
        };

        let errors = validation_errors(SubscriptionValidator::new().validate_create(&request));

        assert!(errors.has_field("user_id"));
        assert!(errors.has_field("start_date"));
        assert!(errors.has_field("end_date"));
    }

    #[test]
    fn create_rejects_end_before_start() {
        let request = CreateSubscriptionRequest {
            start_date: Some("06-2024".to_string()),
            end_date: Some("05-2024".to_string()),
            ..create_request()
        };

        let errors = validation_errors(SubscriptionValidator::new().validate_create(&request));
        assert_eq!(errors.messages(), vec!["end_date: must not be before start_date"]);
    }

    #[test]
    fn create_accepts_single_month_subscription() {
        let request = CreateSubscriptionRequest {
            start_date: Some("05-2024".to_string()),
            end_date: Some("05-2024".to_string()),
            ..create_request()
        };
        assert!(SubscriptionValidator::new().validate_create(&request).is_ok());
    }

    #[test]
    fn update_with_nothing_changes_nothing() {
        let changes = SubscriptionValidator::new()
            .validate_update(&UpdateSubscriptionRequest::default())
            .unwrap();
        assert_eq!(changes, SubscriptionChanges::default());
    }

    #[test]
    fn update_validates_supplied_fields() {
        let request = UpdateSubscriptionRequest {
            service_name: Patch::Value("X".to_string()),
            price: Patch::Value(Decimal::ZERO),
            start_date: Patch::Value("00-2024".to_string()),
            end_date: Patch::Value("garbage".to_string()),
        };

        let errors = validation_errors(SubscriptionValidator::new().validate_update(&request));
        assert_eq!(errors.fields().count(), 4);
    }

    #[test]
    fn update_null_clears_end_date_only() {
        let validator = SubscriptionValidator::new();

        let clear = UpdateSubscriptionRequest {
            end_date: Patch::Null,
            ..Default::default()
        };
        assert_eq!(
            validator.validate_update(&clear).unwrap().end_date,
            Patch::Null
        );

        let null_price = UpdateSubscriptionRequest {
            price: Patch::Null,
            ..Default::default()
        };
        let errors = validation_errors(validator.validate_update(&null_price));
        assert_eq!(errors.messages(), vec!["price: cannot be null"]);
    }

    #[test]
    fn list_defaults() {
        let filter = SubscriptionValidator::new()
            .validate_list(&ListSubscriptionsQuery::default())
            .unwrap();
        assert_eq!(
            filter,
            ListFilter {
                user_id: None,
                limit: DEFAULT_PAGE_LIMIT,
                offset: 0
            }
        );
    }

    #[test]
    fn list_parses_supplied_values() {
        let query = ListSubscriptionsQuery {
            user_id: Some(USER.to_string()),
            limit: Some("25".to_string()),
            offset: Some("5".to_string()),
        };
        let filter = SubscriptionValidator::new().validate_list(&query).unwrap();
        assert_eq!(filter.user_id.map(|u| u.to_string()).as_deref(), Some(USER));
        assert_eq!(filter.limit, 25);
        assert_eq!(filter.offset, 5);
    }

    #[test]
    fn list_rejects_bad_paging() {
        let validator = SubscriptionValidator::new();
        for limit in ["0", "-1", "ten"] {
            let query = ListSubscriptionsQuery {
                limit: Some(limit.to_string()),
                ..Default::default()
            };
            assert!(validation_errors(validator.validate_list(&query)).has_field("limit"));
        }

        let query = ListSubscriptionsQuery {
            offset: Some("-1".to_string()),
            ..Default::default()
        };
        assert!(validation_errors(validator.validate_list(&query)).has_field("offset"));

        let query = ListSubscriptionsQuery {
            user_id: Some("42".to_string()),
            ..Default::default()
        };
        assert!(validation_errors(validator.validate_list(&query)).has_field("user_id"));
    }

    #[test]
    fn summary_requires_both_periods() {
        let errors = validation_errors(
            SubscriptionValidator::new().validate_summary(&SubscriptionSummaryQuery::default()),
        );
        assert!(errors.has_field("start_date"));
        assert!(errors.has_field("end_date"));
    }

    #[test]
    fn summary_translates_filters() {
        let query = SubscriptionSummaryQuery {
            user_id: Some(USER.to_string()),
            service_name: Some("Netflix".to_string()),
            start_date: Some("03-2024".to_string()),
            end_date: Some("04-2024".to_string()),
        };
        let filter = SubscriptionValidator::new().validate_summary(&query).unwrap();

        assert_eq!(filter.service_name.as_deref(), Some("Netflix"));
        assert_eq!(filter.period_start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(filter.period_end, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
    }

    #[test]
    fn summary_rejects_short_service_name() {
        let query = SubscriptionSummaryQuery {
            service_name: Some("N".to_string()),
            start_date: Some("05-2024".to_string()),
            end_date: Some("06-2024".to_string()),
            ..Default::default()
        };
        let errors = validation_errors(SubscriptionValidator::new().validate_summary(&query));
        assert!(errors.has_field("service_name"));
        assert!(!errors.has_field("end_date"));
    }

    #[test]
    fn summary_accepts_reversed_period() {
        let query = SubscriptionSummaryQuery {
            start_date: Some("06-2024".to_string()),
            end_date: Some("03-2024".to_string()),
            ..Default::default()
        };
        let filter = SubscriptionValidator::new().validate_summary(&query).unwrap();
        assert_eq!(filter.period_start, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(filter.period_end, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }
}
