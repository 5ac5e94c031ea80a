use std::env;
use std::time::Duration;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Postgres schema used as the connection search path
    pub db_schema: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_max_lifetime: Duration,
    pub request_timeout: Duration,
    /// Create the subscriptions table on startup if it is missing
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = match env::var("DATABASE_URL") {
            Ok(url) if !url.is_empty() => url,
            _ => database_url_from_parts(
                &var_or("APP_DB_USER", "postgres"),
                &var_or("APP_DB_PASSWORD", "postgres"),
                &var_or("APP_DB_HOST", "pg"),
                &var_or("APP_DB_PORT", "5432"),
                &var_or("APP_DB_NAME", "postgres"),
            ),
        };

        Ok(Self {
            port: parse_var("APP_API_PORT", 8080)?,
            database_url,
            db_schema: var_or("APP_DB_SCHEMA", "public"),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 100)?,
            db_min_connections: parse_var("DB_MIN_CONNECTIONS", 10)?,
            db_max_lifetime: Duration::from_secs(parse_var("DB_MAX_LIFETIME_SECS", 3600)?),
            request_timeout: Duration::from_secs(parse_var("REQUEST_TIMEOUT_SECS", 15)?),
            run_migrations: parse_var("RUN_MIGRATIONS", true)?,
        })
    }
}

/// Build a Postgres URL, escaping credentials that contain reserved characters
pub fn database_url_from_parts(
    user: &str,
    password: &str,
    host: &str,
    port: &str,
    name: &str,
) -> String {
    format!(
        "postgres://{}:{}@{}:{}/{}",
        urlencoding::encode(user),
        urlencoding::encode(password),
        host,
        port,
        name
    )
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) if !raw.is_empty() => raw
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        _ => Ok(default),
    }
}
