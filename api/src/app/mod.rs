//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and the wire format.

pub mod subscription_dto;
pub mod subscription_service;
pub mod validator;

pub use subscription_dto::{
    CreateSubscriptionRequest, ListSubscriptionsQuery, SubscriptionResponse,
    SubscriptionSummaryQuery, SubscriptionSummaryResponse, UpdateSubscriptionRequest,
};
pub use subscription_service::SubscriptionService;
pub use validator::SubscriptionValidator;
