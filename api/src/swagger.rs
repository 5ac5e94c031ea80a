//! OpenAPI document for the HTTP API
//!
//! Served as JSON at `/api-doc/openapi.json` and browsable at `/swagger/`.

use utoipa::OpenApi;

use crate::app::{
    CreateSubscriptionRequest, SubscriptionResponse, SubscriptionSummaryResponse,
    UpdateSubscriptionRequest,
};
use crate::error::ErrorResponse;
use crate::handlers::subscriptions;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Subscriptions API",
        description = "Users' online-service subscriptions and their cost over month ranges",
    ),
    paths(
        subscriptions::create_subscription,
        subscriptions::get_subscription,
        subscriptions::update_subscription,
        subscriptions::delete_subscription,
        subscriptions::list_subscriptions,
        subscriptions::get_subscription_summary,
    ),
    components(
        schemas(
            CreateSubscriptionRequest,
            UpdateSubscriptionRequest,
            SubscriptionResponse,
            SubscriptionSummaryResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "subscriptions", description = "Subscription records and cost summaries")
    )
)]
pub struct ApiDoc;
