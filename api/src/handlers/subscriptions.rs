//! Subscription handlers
//!
//! Thin adapters from HTTP to `SubscriptionService`. Path IDs and JSON bodies
//! are decoded here so that their failures share the API's error body.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::app::{
    CreateSubscriptionRequest, ListSubscriptionsQuery, SubscriptionResponse,
    SubscriptionSummaryQuery, SubscriptionSummaryResponse, UpdateSubscriptionRequest,
};
use crate::domain::entities::SubscriptionId;
use crate::domain::ports::SubscriptionRepository;
use crate::error::{AppError, ErrorResponse};
use crate::AppState;

fn parse_subscription_id(raw: &str) -> Result<SubscriptionId, AppError> {
    Uuid::parse_str(raw)
        .map(SubscriptionId)
        .map_err(|_| AppError::BadRequest("Invalid subscription ID".to_string()))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::InvalidPayload(rejection.body_text()))
}

fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::InvalidQuery(rejection.body_text()))
}

/// Create a subscription
#[utoipa::path(
    post,
    path = "/api/subscriptions",
    tag = "subscriptions",
    request_body = CreateSubscriptionRequest,
    responses(
        (status = 201, description = "Subscription created", body = SubscriptionResponse),
        (status = 400, description = "Invalid payload or fields", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn create_subscription<SR>(
    State(state): State<AppState<SR>>,
    payload: Result<Json<CreateSubscriptionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), AppError>
where
    SR: SubscriptionRepository + 'static,
{
    let request = json_body(payload)?;
    let created = state.subscription_service.create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get a subscription by ID
#[utoipa::path(
    get,
    path = "/api/subscriptions/{id}",
    tag = "subscriptions",
    params(("id" = String, Path, description = "Subscription ID (UUID)")),
    responses(
        (status = 200, description = "Subscription found", body = SubscriptionResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "No such subscription", body = ErrorResponse),
    )
)]
pub async fn get_subscription<SR>(
    State(state): State<AppState<SR>>,
    Path(id): Path<String>,
) -> Result<Json<SubscriptionResponse>, AppError>
where
    SR: SubscriptionRepository + 'static,
{
    let id = parse_subscription_id(&id)?;
    Ok(Json(state.subscription_service.get_by_id(&id).await?))
}

/// Update a subscription
///
/// Sparse update: fields left out of the body keep their stored values.
#[utoipa::path(
    put,
    path = "/api/subscriptions/{id}",
    tag = "subscriptions",
    params(("id" = String, Path, description = "Subscription ID (UUID)")),
    request_body = UpdateSubscriptionRequest,
    responses(
        (status = 200, description = "Subscription updated", body = SubscriptionResponse),
        (status = 400, description = "Malformed ID, payload or fields", body = ErrorResponse),
        (status = 404, description = "No such subscription", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn update_subscription<SR>(
    State(state): State<AppState<SR>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateSubscriptionRequest>, JsonRejection>,
) -> Result<Json<SubscriptionResponse>, AppError>
where
    SR: SubscriptionRepository + 'static,
{
    let id = parse_subscription_id(&id)?;
    let request = json_body(payload)?;
    Ok(Json(state.subscription_service.update(&id, request).await?))
}

/// Delete a subscription
#[utoipa::path(
    delete,
    path = "/api/subscriptions/{id}",
    tag = "subscriptions",
    params(("id" = String, Path, description = "Subscription ID (UUID)")),
    responses(
        (status = 204, description = "Subscription deleted, or it did not exist"),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn delete_subscription<SR>(
    State(state): State<AppState<SR>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError>
where
    SR: SubscriptionRepository + 'static,
{
    let id = parse_subscription_id(&id)?;
    state.subscription_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List subscriptions
#[utoipa::path(
    get,
    path = "/api/subscriptions",
    tag = "subscriptions",
    params(ListSubscriptionsQuery),
    responses(
        (status = 200, description = "One page of subscriptions", body = Vec<SubscriptionResponse>),
        (status = 400, description = "Invalid filters or paging", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn list_subscriptions<SR>(
    State(state): State<AppState<SR>>,
    query: Result<Query<ListSubscriptionsQuery>, QueryRejection>,
) -> Result<Json<Vec<SubscriptionResponse>>, AppError>
where
    SR: SubscriptionRepository + 'static,
{
    let query = query_params(query)?;
    Ok(Json(state.subscription_service.list(query).await?))
}

/// Total cost of subscriptions active during a period
#[utoipa::path(
    get,
    path = "/api/subscriptions/summary",
    tag = "subscriptions",
    params(SubscriptionSummaryQuery),
    responses(
        (status = 200, description = "Totals for the period", body = SubscriptionSummaryResponse),
        (status = 400, description = "Invalid period or filters", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn get_subscription_summary<SR>(
    State(state): State<AppState<SR>>,
    query: Result<Query<SubscriptionSummaryQuery>, QueryRejection>,
) -> Result<Json<SubscriptionSummaryResponse>, AppError>
where
    SR: SubscriptionRepository + 'static,
{
    let query = query_params(query)?;
    Ok(Json(state.subscription_service.get_summary(query).await?))
}
