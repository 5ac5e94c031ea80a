//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod subscriptions;

pub use subscriptions::{
    create_subscription, delete_subscription, get_subscription, get_subscription_summary,
    list_subscriptions, update_subscription,
};
