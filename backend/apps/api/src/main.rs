//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use anyhow::Context;
use auth::domain::AuthSessionRepository;
use auth::{AuthConfig, HeaderRoleGate, PgAuthRepository, RoleGate, auth_router};
use axum::{
    Router, http,
    http::{HeaderName, Method, header},
};
use club::{ClubConfig, PgClubRepository, club_router};
use platform::client::{AUTH_TOKEN_HEADER, USER_ID_HEADER, USER_ROLE_HEADER};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

/// Optional environment variable; unset or blank is `None`
fn env_opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Optional environment variable parsed as a number of seconds
fn env_secs(name: &str) -> anyhow::Result<Option<Duration>> {
    env_opt(name)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .with_context(|| format!("{name} must be a whole number of seconds"))
        })
        .transpose()
}

fn auth_config_from_env() -> anyhow::Result<AuthConfig> {
    let mut config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        AuthConfig::default()
    };

    if let Some(token) = env_opt("TELEGRAM_BOT_TOKEN") {
        config = config.with_telegram_bot_token(token);
    } else {
        tracing::warn!("TELEGRAM_BOT_TOKEN is not set, Telegram login disabled");
    }
    if let Some(ttl) = env_secs("SESSION_TTL_SECS")? {
        config.session_ttl = ttl;
    }
    if let Some(max_age) = env_secs("TELEGRAM_AUTH_MAX_AGE_SECS")? {
        config.telegram_auth_max_age = max_age;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,club=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url =
        env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;
    let max_connections = match env_opt("DB_MAX_CONNECTIONS") {
        Some(raw) => raw
            .trim()
            .parse()
            .context("DB_MAX_CONNECTIONS must be a positive integer")?,
        None => 5,
    };

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await
        .context("failed to connect to database")?;

    tracing::info!(max_connections, "Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: remove expired auth sessions
    // Errors here should not prevent server startup
    let auth_store = PgAuthRepository::new(pool.clone());
    if let Err(e) = auth_store.cleanup_expired().await {
        tracing::warn!(
            error = %e,
            "Auth session cleanup failed, continuing anyway"
        );
    }

    let auth_config = auth_config_from_env()?;
    tracing::info!(config = ?auth_config, "Auth configured");

    let club_config = if cfg!(debug_assertions) {
        ClubConfig::development()
    } else {
        ClubConfig::default()
    };

    let gate: Arc<dyn RoleGate> = Arc::new(HeaderRoleGate);

    // CORS configuration
    let frontend_origins =
        env_opt("FRONTEND_ORIGINS").unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            HeaderName::from_static(USER_ROLE_HEADER),
            HeaderName::from_static(USER_ID_HEADER),
            HeaderName::from_static(AUTH_TOKEN_HEADER),
        ]));

    // Build router
    let app = Router::new()
        .nest("/api/auth", auth_router(auth_store, auth_config))
        .nest(
            "/api",
            club_router(PgClubRepository::new(pool.clone()), gate, club_config),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let bind_addr = env_opt("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
    let addr: SocketAddr = bind_addr
        .trim()
        .parse()
        .with_context(|| format!("BIND_ADDR is not a socket address: {bind_addr}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
