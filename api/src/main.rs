//! Subscriptions API Server
//!
//! Tracks users' recurring online-service subscriptions and sums their cost
//! over month ranges. Uses hexagonal (ports & adapters) architecture.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::get,
    Json, Router,
};
use sea_orm::{ConnectOptions, Database};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;
mod swagger;

#[cfg(test)]
mod test_utils;


use adapters::postgres::schema;
use adapters::PostgresSubscriptionRepository;
use app::{SubscriptionService, SubscriptionValidator};
use config::Config;
use domain::ports::SubscriptionRepository;

/// Application state shared across all handlers
pub struct AppState<SR>
where
    SR: SubscriptionRepository,
{
    pub subscription_service: Arc<SubscriptionService<SR>>,
}

impl<SR> Clone for AppState<SR>
where
    SR: SubscriptionRepository,
{
    fn clone(&self) -> Self {
        Self {
            subscription_service: Arc::clone(&self.subscription_service),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the HTTP router over any subscription store, with its OpenAPI docs
pub fn build_router<SR>(state: AppState<SR>, request_timeout: Duration) -> Router
where
    SR: SubscriptionRepository + 'static,
{
    let api = Router::new()
        .route(
            "/subscriptions",
            get(handlers::list_subscriptions::<SR>).post(handlers::create_subscription::<SR>),
        )
        .route(
            "/subscriptions/summary",
            get(handlers::get_subscription_summary::<SR>),
        )
        .route(
            "/subscriptions/:id",
            get(handlers::get_subscription::<SR>)
                .put(handlers::update_subscription::<SR>)
                .delete(handlers::delete_subscription::<SR>),
        );

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .merge(
            SwaggerUi::new("/swagger").url("/api-doc/openapi.json", swagger::ApiDoc::openapi()),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([
                            Method::GET,
                            Method::POST,
                            Method::PUT,
                            Method::DELETE,
                            Method::OPTIONS,
                        ])
                        .allow_headers([CONTENT_TYPE, AUTHORIZATION]),
                )
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,subscriptions_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Subscriptions API...");

    // Load configuration
    let config = Config::from_env()?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .max_lifetime(config.db_max_lifetime)
        .set_schema_search_path(config.db_schema.clone())
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // `migrate up|down` manages the schema and exits
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Some("migrate") = args.first().map(String::as_str) {
        match args.get(1).map(String::as_str) {
            Some("up") | None => schema::apply(&db).await?,
            Some("down") => schema::revert(&db).await?,
            Some(other) => anyhow::bail!("Unknown migrate direction: {other} (expected up or down)"),
        }
        return Ok(());
    }

    if config.run_migrations {
        schema::apply(&db).await?;
    }

    // Create adapters and services
    let subscription_repo = Arc::new(PostgresSubscriptionRepository::new(db));
    let validator = Arc::new(SubscriptionValidator::new());
    let subscription_service = Arc::new(SubscriptionService::new(subscription_repo, validator));

    let state = AppState {
        subscription_service,
    };
    let app = build_router(state, config.request_timeout);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
