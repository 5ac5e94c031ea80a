//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod patch;
pub mod subscription;

pub use patch::Patch;
pub use subscription::{
    ListFilter, NewSubscription, Subscription, SubscriptionChanges, SubscriptionId,
    SubscriptionTotals, SummaryFilter, UserId,
};
