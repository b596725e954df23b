//! EcoLeague API Server
//!
//! Weekly recycling leagues: ranks participants by points, shows zones and
//! countdowns, and promotes or demotes everyone at each Sunday boundary.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::GlobalKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod integration_tests;

use adapters::{PostgresEpochRepository, PostgresParticipantRepository, SystemClock};
use app::{league_config, EpochClock, EpochScheduler, LeagueService};
use config::Config;
use domain::ports::{EpochRepository, ParticipantRepository};

/// League service as shared by handlers and the scheduler
pub type SharedLeagueService =
    Arc<LeagueService<dyn ParticipantRepository, dyn EpochRepository>>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub league_service: SharedLeagueService,
    /// SHA-256 of the admin key, if admin routes are enabled
    pub admin_key_hash: Option<String>,
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

/// Build the HTTP router
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    // Manual transitions are expensive: 2 in a burst, then one per 30s
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(GlobalKeyExtractor)
            .per_second(30)
            .burst_size(2)
            .finish()
            .context("Failed to build governor config")?,
    );

    let transition_routes = Router::new()
        .route("/epoch/transition", post(handlers::trigger_transition))
        .layer(GovernorLayer {
            config: governor_config,
        });

    let admin_routes = Router::new()
        .route("/participants", post(handlers::enroll_participant))
        .route("/participants/:id/points", post(handlers::add_points))
        .merge(transition_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::admin_middleware,
        ));

    let app = Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        // Public read endpoints
        .route("/leagues", get(handlers::list_leagues))
        .route("/leagues/:id", get(handlers::get_league))
        .route("/leagues/:id/leaderboard", get(handlers::get_leaderboard))
        .route("/participants/:id", get(handlers::get_standing))
        .route("/epoch", get(handlers::get_epoch))
        // Admin endpoints
        .merge(admin_routes)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ecoleague_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting EcoLeague API...");

    // Load configuration
    let config = Config::from_env()?;
    if !config.admin_enabled() {
        tracing::warn!("ADMIN_API_KEY not set, admin routes will reject all requests");
    }

    let table = Arc::new(league_config::load_table(
        config.league_config_path.as_deref(),
    )?);
    tracing::info!(
        leagues = table.len(),
        entry = %table.entry().id,
        top = %table.top().id,
        "League table ready"
    );

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Create adapters
    let participant_repo: Arc<dyn ParticipantRepository> =
        Arc::new(PostgresParticipantRepository::new(db.clone()));
    let epoch_repo: Arc<dyn EpochRepository> = Arc::new(PostgresEpochRepository::new(db));

    // Create application services
    let league_service: SharedLeagueService = Arc::new(LeagueService::new(
        participant_repo,
        epoch_repo.clone(),
        table,
        EpochClock::new(config.epoch_utc_offset),
        Arc::new(SystemClock),
    ));

    // Weekly transitions run in the background
    let scheduler = EpochScheduler::new(
        league_service.clone(),
        epoch_repo,
        config.scheduler_poll_interval,
    );
    tokio::spawn(scheduler.run());

    let state = AppState {
        league_service,
        admin_key_hash: config.admin_api_key.as_deref().map(auth::hash_api_key),
    };
    let app = build_router(state)?;

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
